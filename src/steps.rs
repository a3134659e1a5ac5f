//! The step vocabulary: every pattern the contexts answer to.
//!
//! Definitions are compiled once and kept in declaration order. Matching
//! strips a leading Gherkin keyword, so `And I confirm the alert` and
//! `I confirm the alert` both resolve to the same definition.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// The Gherkin keyword a definition is declared under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKeyword {
    /// Scenario set-up.
    Given,
    /// An action.
    When,
    /// An assertion.
    Then,
}

impl StepKeyword {
    /// The keyword as written in feature files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operation a definition runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    /// Dismiss any open alert.
    ClearAlerts,
    /// Accept the open alert.
    ConfirmAlert,
    /// Dismiss the open alert.
    CancelAlert,
    /// Assert the open alert's text.
    AssertAlertMessage,
    /// Type into the open prompt.
    SetAlertText,
    /// Assert a variable is not null.
    AssertVariableHasValue,
    /// Assert a variable's `typeof`.
    AssertVariableType,
    /// Assert selected keys of a variable's JSON form.
    AssertJsonContents,
    /// Assert a variable's value.
    AssertVariable,
    /// Assert a table of variables and values.
    AssertVariables,
    /// Store a two-column table as an object.
    StoreTable,
    /// Store a single cast value.
    StoreValue,
    /// Store a docstring verbatim.
    StoreString,
    /// Navigate after a delay.
    VisitPathDelayed,
    /// Open an alert, confirm or prompt.
    OpenPopup,
    /// Assert what a popup returned.
    AssertPopupResult,
    /// Assert an image loaded.
    AssertImageLoaded,
    /// Assert an image did not load.
    AssertImageNotLoaded,
}

/// The multiline argument a step needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// A Gherkin data table.
    Table,
    /// A Gherkin docstring.
    DocString,
}

impl ArgumentKind {
    /// Name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::DocString => "docstring",
        }
    }
}

impl StepAction {
    /// The multiline argument the action consumes, if any.
    #[must_use]
    pub const fn argument(self) -> Option<ArgumentKind> {
        match self {
            Self::AssertJsonContents | Self::AssertVariables | Self::StoreTable => {
                Some(ArgumentKind::Table)
            }
            Self::StoreString => Some(ArgumentKind::DocString),
            _ => None,
        }
    }
}

/// A pattern bound to a step action.
#[derive(Debug)]
pub struct StepDefinition {
    keyword: StepKeyword,
    pattern: Regex,
    action: StepAction,
    description: &'static str,
}

impl StepDefinition {
    /// The keyword the step is declared under.
    #[must_use]
    pub const fn keyword(&self) -> StepKeyword {
        self.keyword
    }

    /// The compiled pattern.
    #[must_use]
    pub const fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// The bound action.
    #[must_use]
    pub const fn action(&self) -> StepAction {
        self.action
    }

    /// A one-line description of what the step does.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }
}

/// A definition matched against step text, with its named captures.
#[derive(Debug)]
pub struct StepMatch<'a> {
    definition: &'a StepDefinition,
    captures: BTreeMap<String, String>,
}

impl<'a> StepMatch<'a> {
    /// The matched definition.
    #[must_use]
    pub const fn definition(&self) -> &'a StepDefinition {
        self.definition
    }

    /// The text captured by the named group, if it participated.
    #[must_use]
    pub fn capture(&self, name: &str) -> Option<&str> {
        self.captures.get(name).map(String::as_str)
    }

    /// Every named capture, ordered by group name.
    #[must_use]
    pub const fn captures(&self) -> &BTreeMap<String, String> {
        &self.captures
    }
}

const DEFINITIONS: &[(StepKeyword, &str, StepAction, &str)] = &[
    (
        StepKeyword::Given,
        r"^there are no alerts on the page$",
        StepAction::ClearAlerts,
        "Dismiss any open alert",
    ),
    (
        StepKeyword::When,
        r"^(?:|I )confirm the alert$",
        StepAction::ConfirmAlert,
        "Accept the open alert",
    ),
    (
        StepKeyword::When,
        r"^(?:|I )cancel the alert$",
        StepAction::CancelAlert,
        "Dismiss the open alert",
    ),
    (
        StepKeyword::Then,
        r#"^(?:|I )should see an alert containing "(?P<expected>[^"]*)"$"#,
        StepAction::AssertAlertMessage,
        "Assert the open alert contains the text",
    ),
    (
        StepKeyword::When,
        r#"^(?:|I )fill "(?P<message>[^"]*)" into the prompt$"#,
        StepAction::SetAlertText,
        "Type the text into the open prompt",
    ),
    (
        StepKeyword::Then,
        r#"^the javascript variable "(?P<variable>[^"]+)" should not be null$"#,
        StepAction::AssertVariableHasValue,
        "Assert the variable is neither null nor undefined",
    ),
    (
        StepKeyword::Then,
        r#"^the javascript variable "(?P<variable>.+)" should(?P<not>| not) be type "(?P<type>\w+)"$"#,
        StepAction::AssertVariableType,
        "Assert the variable's typeof result",
    ),
    (
        StepKeyword::Then,
        r#"^the javascript variable "(?P<variable>[^"]+)" should have the following contents:$"#,
        StepAction::AssertJsonContents,
        "Assert selected keys of the variable's JSON form",
    ),
    (
        StepKeyword::Then,
        r#"^the javascript variable "(?P<variable>[^"]+)" should have the value of (?P<expected>"[^"]*"|'[^']*'|\S+)$"#,
        StepAction::AssertVariable,
        "Assert the variable equals the cast value",
    ),
    (
        StepKeyword::Then,
        r"^the javascript variables should be:$",
        StepAction::AssertVariables,
        "Assert each variable in the table equals its cast value",
    ),
    (
        StepKeyword::Given,
        r#"^the following is stored as "(?P<key>[^"]+)":$"#,
        StepAction::StoreTable,
        "Store the table as an object",
    ),
    (
        StepKeyword::Given,
        r#"^the value (?P<value>"[^"]*"|'[^']*'|\S+) is stored as "(?P<key>[^"]+)"$"#,
        StepAction::StoreValue,
        "Store the cast value",
    ),
    (
        StepKeyword::Given,
        r#"^the following string is stored as "(?P<key>[^"]+)":$"#,
        StepAction::StoreString,
        "Store the docstring verbatim",
    ),
    (
        StepKeyword::Given,
        r#"^I will be on "(?P<path>[^"]*)"(?: in (?P<timeout>\d+) seconds)?$"#,
        StepAction::VisitPathDelayed,
        "Navigate to the path after a delay",
    ),
    (
        StepKeyword::Given,
        r#"^there is an? (?P<type>alert|confirm|prompt) containing (?P<text>".+")$"#,
        StepAction::OpenPopup,
        "Open a popup and keep its return value",
    ),
    (
        StepKeyword::Then,
        r"^the (?P<type>alert|confirm|prompt) should return (?P<value>.+)$",
        StepAction::AssertPopupResult,
        "Assert what the popup returned",
    ),
    (
        StepKeyword::Then,
        r#"^I should see "(?P<src>[^"]*)" image in "(?P<locator>[^"]+)"$"#,
        StepAction::AssertImageLoaded,
        "Assert the image finished loading the source",
    ),
    (
        StepKeyword::Then,
        r#"^I should not see an image in "(?P<locator>[^"]+)"$"#,
        StepAction::AssertImageNotLoaded,
        "Assert the image did not load",
    ),
];

#[expect(
    clippy::expect_used,
    reason = "the patterns are literals that are exercised by the unit tests"
)]
static VOCABULARY: LazyLock<Vec<StepDefinition>> = LazyLock::new(|| {
    DEFINITIONS
        .iter()
        .map(|&(keyword, pattern, action, description)| StepDefinition {
            keyword,
            pattern: Regex::new(pattern).expect("step pattern should compile"),
            action,
            description,
        })
        .collect()
});

#[expect(
    clippy::expect_used,
    reason = "the pattern is a literal that is exercised by the unit tests"
)]
static KEYWORD_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Given|When|Then|And|But)\s+").expect("keyword pattern should compile")
});

/// Every step definition, in declaration order.
#[must_use]
pub fn vocabulary() -> &'static [StepDefinition] {
    &VOCABULARY
}

/// Remove surrounding whitespace and a leading Gherkin keyword.
#[must_use]
pub fn strip_keyword(text: &str) -> &str {
    let trimmed = text.trim();
    KEYWORD_PREFIX
        .find(trimmed)
        .and_then(|prefix| trimmed.get(prefix.end()..))
        .unwrap_or(trimmed)
}

/// Find the first definition matching `text`.
#[must_use]
pub fn find_match(text: &str) -> Option<StepMatch<'static>> {
    let body = strip_keyword(text);
    vocabulary().iter().find_map(|definition| {
        let captures = definition.pattern.captures(body)?;
        let named = definition
            .pattern
            .capture_names()
            .flatten()
            .filter_map(|name| {
                captures
                    .name(name)
                    .map(|value| (name.to_owned(), value.as_str().to_owned()))
            })
            .collect();
        Some(StepMatch {
            definition,
            captures: named,
        })
    })
}
