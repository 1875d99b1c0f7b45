use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::StoryError;

pub const MIN_AGE: u8 = 1;
pub const MAX_AGE: u8 = 12;
pub const MAX_CHILDREN: usize = 5;

/// One child as entered on the form. Only aggregated into telemetry,
/// except in the moderated-inputs payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildInfo {
    pub name: String,
    pub age: u8,
}

impl ChildInfo {
    pub fn new(name: impl Into<String>, age: u8) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }
}

/// Target language of the story, one per locale the form offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    English,
    Spanish,
    #[default]
    Estonian,
    Latvian,
    Finnish,
    Russian,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::English,
        Language::Spanish,
        Language::Estonian,
        Language::Latvian,
        Language::Finnish,
        Language::Russian,
    ];

    /// Native label, as shown in the language picker and written into the prompt.
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Español",
            Language::Estonian => "Eesti",
            Language::Latvian => "Latviešu",
            Language::Finnish => "Suomi",
            Language::Russian => "Русский",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::Estonian => "et",
            Language::Latvian => "lv",
            Language::Finnish => "fi",
            Language::Russian => "ru",
        }
    }

    fn english_name(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
            Language::Estonian => "estonian",
            Language::Latvian => "latvian",
            Language::Finnish => "finnish",
            Language::Russian => "russian",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = StoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|language| {
                language.label().to_lowercase() == needle
                    || language.code() == needle
                    || language.english_name() == needle
            })
            .ok_or_else(|| StoryError::invalid_input(format!("unsupported language '{value}'")))
    }
}

/// A validated story request. Construct through [`StoryRequest::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoryRequest {
    children: Vec<ChildInfo>,
    activities_and_toys: String,
    values_to_teach: String,
    language: Language,
}

impl StoryRequest {
    pub fn new(
        children: Vec<ChildInfo>,
        activities_and_toys: impl Into<String>,
        values_to_teach: impl Into<String>,
        language: Language,
    ) -> Result<Self, StoryError> {
        if children.is_empty() {
            return Err(StoryError::invalid_input("at least one child is required"));
        }
        if children.len() > MAX_CHILDREN {
            return Err(StoryError::invalid_input(format!(
                "at most {MAX_CHILDREN} children are supported, got {}",
                children.len()
            )));
        }

        let children = children
            .into_iter()
            .map(|child| {
                let name = child.name.trim().to_string();
                if name.is_empty() {
                    return Err(StoryError::invalid_input("child name must not be blank"));
                }
                if !(MIN_AGE..=MAX_AGE).contains(&child.age) {
                    return Err(StoryError::invalid_input(format!(
                        "age of {name} must be between {MIN_AGE} and {MAX_AGE}, got {}",
                        child.age
                    )));
                }
                Ok(ChildInfo {
                    name,
                    age: child.age,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            children,
            activities_and_toys: activities_and_toys.into(),
            values_to_teach: values_to_teach.into(),
            language,
        })
    }

    pub fn children(&self) -> &[ChildInfo] {
        &self.children
    }

    pub fn ages(&self) -> Vec<u8> {
        self.children.iter().map(|child| child.age).collect()
    }

    pub fn activities_and_toys(&self) -> &str {
        &self.activities_and_toys
    }

    pub fn values_to_teach(&self) -> &str {
        &self.values_to_teach
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

/// A user rating of a delivered story, 1 to 5 inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: u8) -> Result<Self, StoryError> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(StoryError::invalid_input(format!(
                "rating must be between 1 and 5, got {value}"
            )))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = StoryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}
