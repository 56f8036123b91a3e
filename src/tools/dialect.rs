// src/tools/dialect.rs
use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown search engine: {0}")]
pub struct UnknownEngine(pub String);

/// Search engines a query can be targeted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EngineId {
    #[default]
    Google,
    Bing,
    Yahoo,
    DuckDuckGo,
    Startpage,
    Brave,
}

/// Static description of how to reach an engine's result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct EngineProfile {
    pub id: EngineId,
    pub name: &'static str,
    pub base_url: &'static str,
    pub query_param: &'static str,
}

impl EngineId {
    pub const ALL: [EngineId; 6] = [
        EngineId::Google,
        EngineId::Bing,
        EngineId::Yahoo,
        EngineId::DuckDuckGo,
        EngineId::Startpage,
        EngineId::Brave,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EngineId::Google => "google",
            EngineId::Bing => "bing",
            EngineId::Yahoo => "yahoo",
            EngineId::DuckDuckGo => "duckduckgo",
            EngineId::Startpage => "startpage",
            EngineId::Brave => "brave",
        }
    }

    pub fn profile(self) -> EngineProfile {
        let (name, base_url, query_param) = match self {
            EngineId::Google => ("Google", "https://www.google.com/search", "q"),
            EngineId::Bing => ("Bing", "https://www.bing.com/search", "q"),
            EngineId::Yahoo => ("Yahoo", "https://search.yahoo.com/search", "p"),
            EngineId::DuckDuckGo => ("DuckDuckGo", "https://duckduckgo.com/", "q"),
            EngineId::Startpage => ("Startpage", "https://www.startpage.com/do/search", "query"),
            EngineId::Brave => ("Brave Search", "https://search.brave.com/search", "q"),
        };

        EngineProfile { id: self, name, base_url, query_param }
    }

    pub fn dialect(self) -> OperatorDialect {
        dialect_for(self)
    }

    /// Only Google gets the long exclusion-heavy base fragments; the other
    /// engines choke on nested `-inurl:(...)` groups.
    pub fn prefers_full_fragments(self) -> bool {
        self == EngineId::Google
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EngineId {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        EngineId::ALL
            .into_iter()
            .find(|engine| engine.as_str() == wanted)
            .ok_or_else(|| UnknownEngine(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbstractOperator {
    Site,
    Filetype,
    Ext,
    Inurl,
    Allinurl,
    Intitle,
    Allintitle,
    Intext,
    Allintext,
    Cache,
    Link,
    Related,
    Info,
    Define,
    Stocks,
    Map,
    Movie,
    Weather,
    Source,
    Before,
    After,
}

impl AbstractOperator {
    pub const ALL: [AbstractOperator; 21] = [
        AbstractOperator::Site,
        AbstractOperator::Filetype,
        AbstractOperator::Ext,
        AbstractOperator::Inurl,
        AbstractOperator::Allinurl,
        AbstractOperator::Intitle,
        AbstractOperator::Allintitle,
        AbstractOperator::Intext,
        AbstractOperator::Allintext,
        AbstractOperator::Cache,
        AbstractOperator::Link,
        AbstractOperator::Related,
        AbstractOperator::Info,
        AbstractOperator::Define,
        AbstractOperator::Stocks,
        AbstractOperator::Map,
        AbstractOperator::Movie,
        AbstractOperator::Weather,
        AbstractOperator::Source,
        AbstractOperator::Before,
        AbstractOperator::After,
    ];

    /// The Google spelling of the operator, colon included.
    pub fn canonical_token(self) -> &'static str {
        match self {
            AbstractOperator::Site => "site:",
            AbstractOperator::Filetype => "filetype:",
            AbstractOperator::Ext => "ext:",
            AbstractOperator::Inurl => "inurl:",
            AbstractOperator::Allinurl => "allinurl:",
            AbstractOperator::Intitle => "intitle:",
            AbstractOperator::Allintitle => "allintitle:",
            AbstractOperator::Intext => "intext:",
            AbstractOperator::Allintext => "allintext:",
            AbstractOperator::Cache => "cache:",
            AbstractOperator::Link => "link:",
            AbstractOperator::Related => "related:",
            AbstractOperator::Info => "info:",
            AbstractOperator::Define => "define:",
            AbstractOperator::Stocks => "stocks:",
            AbstractOperator::Map => "map:",
            AbstractOperator::Movie => "movie:",
            AbstractOperator::Weather => "weather:",
            AbstractOperator::Source => "source:",
            AbstractOperator::Before => "before:",
            AbstractOperator::After => "after:",
        }
    }

    pub fn name(self) -> &'static str {
        self.canonical_token().trim_end_matches(':')
    }
}

/// Operator spelling rules for a family of engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorDialect {
    /// Full Google syntax (Google, Startpage, Brave).
    Google,
    /// Reduced syntax shared by Bing, Yahoo and DuckDuckGo.
    Common,
}

impl OperatorDialect {
    /// Literal token for `op`, or an empty string when the dialect has no
    /// equivalent and the clause must be dropped.
    pub fn token(self, op: AbstractOperator) -> &'static str {
        use AbstractOperator::*;

        match self {
            OperatorDialect::Google => op.canonical_token(),
            OperatorDialect::Common => match op {
                Site => "site:",
                Filetype | Ext => "filetype:",
                Inurl | Allinurl => "inbody:",
                Intitle | Allintitle => "intitle:",
                Intext | Allintext => "inbody:",
                Cache | Link | Related | Info | Define | Stocks | Map | Movie | Weather
                | Source | Before | After => "",
            },
        }
    }

    pub fn supports(self, op: AbstractOperator) -> bool {
        !self.token(op).is_empty()
    }

    /// `{token}{value}`, or `None` when the operator is unsupported.
    pub fn clause(self, op: AbstractOperator, value: &str) -> Option<String> {
        let token = self.token(op);
        if token.is_empty() {
            None
        } else {
            Some(format!("{}{}", token, value))
        }
    }

    pub fn entries(self) -> Vec<(AbstractOperator, &'static str)> {
        AbstractOperator::ALL
            .iter()
            .map(|op| (*op, self.token(*op)))
            .collect()
    }
}

pub fn dialect_for(engine: EngineId) -> OperatorDialect {
    match engine {
        EngineId::Google | EngineId::Startpage | EngineId::Brave => OperatorDialect::Google,
        EngineId::Bing | EngineId::Yahoo | EngineId::DuckDuckGo => OperatorDialect::Common,
    }
}
