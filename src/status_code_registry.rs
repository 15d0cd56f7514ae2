use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

// https://www.iana.org/assignments/http-status-codes/http-status-codes.xhtml

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, EnumIter)]
#[repr(u16)]
pub enum ReasonPhrase {
    OK = 200,
    BadRequest = 400,
    NotFound = 404,
}

impl ReasonPhrase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OK => "OK",
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
        }
    }
}

impl Display for ReasonPhrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

lazy_static! {
    static ref REGISTRY: HashMap<u16, ReasonPhrase> = ReasonPhrase::iter()
        .map(|reason_phrase| (reason_phrase as u16, reason_phrase))
        .collect();
}

pub fn get_reason_phrase(status_code: u16) -> Option<ReasonPhrase> {
    REGISTRY.get(&status_code).copied()
}

pub fn get_status_code(reason_phrase: ReasonPhrase) -> u16 {
    reason_phrase as u16
}
