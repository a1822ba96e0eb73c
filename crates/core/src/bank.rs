//! Question bank ingestion.
//!
//! Raw modules arrive already parsed into JSON values; everything past this
//! boundary is a validated `Question`.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::model::{Question, QuestionError, QuestionId, QuestionKind, QuizOption};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("no question modules were loaded")]
    NoData,
}

/// One named collection of raw question records.
#[derive(Debug, Clone, PartialEq)]
pub struct RawModule {
    pub name: String,
    pub data: Value,
}

impl RawModule {
    #[must_use]
    pub fn new(name: impl Into<String>, data: Value) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Wire shape of a record inside a module file.
///
/// `null` text fields read as empty. Any `type` other than `"multi"`,
/// including a missing one, is single-choice.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(rename = "type", default, deserialize_with = "kind_from_tag")]
    pub kind: QuestionKind,
    pub question: String,
    pub options: Vec<RawOption>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explanation: String,
}

/// Wire shape of one option inside a record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOption {
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub correct: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn kind_from_tag<'de, D>(deserializer: D) -> Result<QuestionKind, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<Value>::deserialize(deserializer)?;
    Ok(match tag.as_ref().and_then(Value::as_str) {
        Some("multi") => QuestionKind::Multi,
        _ => QuestionKind::Single,
    })
}

impl RawQuestion {
    /// Validate the record and attach its id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the record fails question validation.
    pub fn into_question(self, id: QuestionId) -> Result<Question, QuestionError> {
        Question::new(
            id,
            self.category,
            self.kind,
            self.question,
            self.options
                .into_iter()
                .map(|o| QuizOption::new(o.text, o.correct))
                .collect(),
            self.explanation,
        )
    }
}

/// The full set of questions available to sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
    modules: Vec<String>,
    is_demo: bool,
}

impl QuestionBank {
    /// Assemble a bank from already-canonical questions.
    ///
    /// Later questions whose id was already seen are dropped.
    #[must_use]
    pub fn from_questions(questions: Vec<Question>, modules: Vec<String>, is_demo: bool) -> Self {
        let mut seen = HashSet::with_capacity(questions.len());
        let questions = questions
            .into_iter()
            .filter(|q| {
                let fresh = seen.insert(q.id().clone());
                if !fresh {
                    tracing::warn!(id = %q.id(), "dropping question with duplicate id");
                }
                fresh
            })
            .collect();
        Self {
            questions,
            modules,
            is_demo,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Names of the modules the bank was built from, in load order.
    #[must_use]
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// True when the bank is the built-in fallback dataset.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.is_demo
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }
}

/// Flatten raw modules into a bank, assigning `module::position` ids.
///
/// A module whose data is not a list contributes nothing. A record that
/// fails to parse or validate is skipped but still consumes its position,
/// so the ids of its siblings do not shift.
///
/// # Errors
///
/// Returns `BankError::NoData` when `modules` is empty.
pub fn normalize(modules: impl IntoIterator<Item = RawModule>) -> Result<QuestionBank, BankError> {
    let mut names: Vec<String> = Vec::new();
    let mut questions = Vec::new();

    for module in modules {
        if names.contains(&module.name) {
            tracing::warn!(module = %module.name, "skipping module with duplicate name");
            continue;
        }

        let records = match module.data {
            Value::Array(records) => records,
            other => {
                tracing::warn!(
                    module = %module.name,
                    kind = json_kind(&other),
                    "module data is not a list; contributes no questions"
                );
                Vec::new()
            }
        };

        let before = questions.len();
        for (index, record) in records.into_iter().enumerate() {
            let id = QuestionId::new(&module.name, index);
            let parsed = serde_json::from_value::<RawQuestion>(record)
                .map_err(|err| err.to_string())
                .and_then(|raw| raw.into_question(id.clone()).map_err(|err| err.to_string()));
            match parsed {
                Ok(question) => {
                    if question.kind() == QuestionKind::Single && question.correct_count() > 1 {
                        tracing::warn!(
                            %id,
                            correct = question.correct_count(),
                            "single-choice question has several correct options; \
                             it cannot be answered correctly"
                        );
                    }
                    questions.push(question);
                }
                Err(reason) => tracing::warn!(%id, %reason, "skipping invalid question record"),
            }
        }
        tracing::debug!(
            module = %module.name,
            questions = questions.len() - before,
            "normalized module"
        );
        names.push(module.name);
    }

    if names.is_empty() {
        return Err(BankError::NoData);
    }

    Ok(QuestionBank::from_questions(questions, names, false))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(prompt: &str) -> Value {
        json!({
            "category": "General",
            "type": "single",
            "question": prompt,
            "options": [
                { "text": "right", "correct": true },
                { "text": "wrong", "correct": false }
            ],
            "explanation": "because"
        })
    }

    #[test]
    fn assigns_module_position_ids() {
        let bank = normalize(vec![
            RawModule::new("alpha", json!([record("a0"), record("a1")])),
            RawModule::new("beta", json!([record("b0")])),
        ])
        .unwrap();

        let ids: Vec<String> = bank.questions().iter().map(|q| q.id().to_string()).collect();
        assert_eq!(ids, vec!["alpha::0", "alpha::1", "beta::0"]);
        assert_eq!(bank.modules(), &["alpha".to_string(), "beta".to_string()]);
        assert!(!bank.is_demo());
        assert_eq!(bank.questions()[2].module(), "beta");
    }

    #[test]
    fn reloading_same_modules_yields_same_ids() {
        let modules = vec![RawModule::new("alpha", json!([record("a0"), record("a1")]))];
        let first = normalize(modules.clone()).unwrap();
        let second = normalize(modules).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn non_list_module_contributes_nothing() {
        let bank = normalize(vec![
            RawModule::new("broken", json!({ "questions": [] })),
            RawModule::new("ok", json!([record("q")])),
        ])
        .unwrap();

        assert_eq!(bank.len(), 1);
        assert_eq!(bank.modules().len(), 2);
    }

    #[test]
    fn invalid_record_keeps_sibling_positions() {
        let bank = normalize(vec![RawModule::new(
            "alpha",
            json!([record("first"), { "question": "missing options" }, record("third")]),
        )])
        .unwrap();

        let ids: Vec<String> = bank.questions().iter().map(|q| q.id().to_string()).collect();
        assert_eq!(ids, vec!["alpha::0", "alpha::2"]);
    }

    #[test]
    fn record_without_correct_option_is_dropped() {
        let bad = json!({
            "question": "none right",
            "options": [{ "text": "a", "correct": false }]
        });
        let bank = normalize(vec![RawModule::new("m", json!([bad]))]).unwrap();
        assert!(bank.is_empty());
    }

    #[test]
    fn missing_type_defaults_to_single() {
        let rec = json!({
            "question": "q",
            "options": [{ "text": "a", "correct": true }]
        });
        let bank = normalize(vec![RawModule::new("m", json!([rec]))]).unwrap();
        assert_eq!(bank.questions()[0].kind(), QuestionKind::Single);
        assert_eq!(bank.questions()[0].category(), "");
    }

    #[test]
    fn loose_record_shapes_are_accepted() {
        let options = json!([{ "text": "a", "correct": true }, { "text": "b", "correct": null }]);
        let bank = normalize(vec![RawModule::new(
            "loose",
            json!([
                { "type": "Single", "question": "q0", "options": options },
                { "type": "multiple", "question": "q1", "options": options },
                { "type": null, "question": "q2", "options": options },
                { "category": null, "explanation": null, "question": "q3", "options": options },
                { "type": 3, "question": "q4", "options": options },
                { "type": "multi", "question": "q5", "options": options }
            ]),
        )])
        .unwrap();

        assert_eq!(bank.len(), 6);
        let kinds: Vec<QuestionKind> = bank.questions().iter().map(Question::kind).collect();
        assert_eq!(&kinds[..5], &[QuestionKind::Single; 5]);
        assert_eq!(kinds[5], QuestionKind::Multi);
        assert_eq!(bank.questions()[3].category(), "");
        assert_eq!(bank.questions()[3].explanation(), "");
        assert!(!bank.questions()[0].options()[1].correct);
    }

    #[test]
    fn zero_modules_signals_no_data() {
        assert_eq!(normalize(Vec::new()).unwrap_err(), BankError::NoData);
    }

    #[test]
    fn duplicate_module_names_are_skipped() {
        let bank = normalize(vec![
            RawModule::new("m", json!([record("first")])),
            RawModule::new("m", json!([record("again")])),
        ])
        .unwrap();
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.questions()[0].prompt(), "first");
    }

    #[test]
    fn bank_lookup_by_id() {
        let bank = normalize(vec![RawModule::new("m", json!([record("x")]))]).unwrap();
        let id = QuestionId::new("m", 0);
        assert_eq!(bank.get(&id).map(Question::prompt), Some("x"));
        assert!(bank.get(&QuestionId::new("m", 9)).is_none());
    }
}
