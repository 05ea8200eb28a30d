// Schema and validation engine

use crate::{ErrorMessages, Rule, Value, Values};
use fieldcheck_log::{debug, trace};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

const LOG_TARGET: &str = "fieldcheck::engine";

/// A rule shared between schemas.
pub type SharedRule = Arc<dyn Rule>;

/// Ordered rules for one field.
#[derive(Clone)]
pub struct FieldRules {
    field: String,
    rules: Vec<SharedRule>,
}

impl FieldRules {
    /// Start an empty rule list for `field`.
    pub fn for_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rules: Vec::new(),
        }
    }

    /// Append a rule.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Append a rule that is already shared.
    pub fn add_shared(mut self, rule: SharedRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn rules(&self) -> &[SharedRule] {
        &self.rules
    }

    /// Run every rule against `value` and collect the failures in order.
    pub fn check(&self, value: &Value) -> Vec<String> {
        run_rules(&self.field, &self.rules, value)
    }
}

impl fmt::Debug for FieldRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRules")
            .field("field", &self.field)
            .field("rules", &rule_names(&self.rules))
            .finish()
    }
}

fn rule_names(rules: &[SharedRule]) -> Vec<&'static str> {
    rules.iter().map(|rule| rule.name()).collect()
}

// No short-circuit: every rule runs even after a failure.
fn run_rules(field: &str, rules: &[SharedRule], value: &Value) -> Vec<String> {
    rules
        .iter()
        .filter_map(|rule| {
            let message = rule.validate(value, field)?;
            trace!(target: LOG_TARGET, "field {} failed rule {}", field, rule.name());
            Some(message)
        })
        .collect()
}

/// Ordered mapping from field name to the rules applied to it.
///
/// Built once and reused; a schema holds no per-call state and can be
/// shared across threads.
///
/// ```
/// use fieldcheck_validation::{FieldRules, GreaterThan, LessThan, Schema, values};
///
/// let schema = Schema::new().field(
///     FieldRules::for_field("age")
///         .add(GreaterThan::new(18))
///         .add(LessThan::new(10)),
/// );
///
/// let result = schema.validate(&values! { "age" => 12 });
/// assert_eq!(
///     result.errors.into_flat(),
///     vec!["age should be greater then 18", "age should be less then 10"]
/// );
/// ```
#[derive(Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, Vec<SharedRule>>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field's rules. Rules for a field that is already present are
    /// appended after the existing ones.
    pub fn field(mut self, rules: FieldRules) -> Self {
        self.fields
            .entry(rules.field)
            .or_default()
            .extend(rules.rules);
        self
    }

    /// Append one rule to `field`.
    pub fn rule<R: Rule + 'static>(mut self, field: impl Into<String>, rule: R) -> Self {
        self.insert(field, Arc::new(rule));
        self
    }

    /// Append a shared rule to `field`.
    pub fn insert(&mut self, field: impl Into<String>, rule: SharedRule) {
        self.fields.entry(field.into()).or_default().push(rule);
    }

    /// Declare `field` without rules. Its value is still passed through.
    pub fn declare(&mut self, field: impl Into<String>) {
        self.fields.entry(field.into()).or_default();
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn rules_for(&self, field: &str) -> Option<&[SharedRule]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Validate with errors grouped by field.
    pub fn validate(&self, values: &Values) -> ValidationResult {
        validate(self, values, false)
    }

    /// Validate with errors flattened into one list.
    pub fn validate_flat(&self, values: &Values) -> ValidationResult {
        validate(self, values, true)
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.fields
                    .iter()
                    .map(|(field, rules)| (field, rule_names(rules))),
            )
            .finish()
    }
}

/// Validate `values` against `schema`.
///
/// Fields are processed in schema order. A missing value is validated as
/// null. Every value named by the schema is copied, unchanged, into
/// `validated`; values the schema does not name are ignored. Every rule of
/// every field runs exactly once.
///
/// With `flatten_errors` the messages come back as one list, fields in
/// schema order and rules in declaration order. Otherwise they are grouped
/// by field, leaving out fields without errors.
pub fn validate(schema: &Schema, values: &Values, flatten_errors: bool) -> ValidationResult {
    debug!(
        target: LOG_TARGET,
        "validating {} fields against {} values",
        schema.len(),
        values.len()
    );

    let mut validated = IndexMap::with_capacity(schema.len());
    let mut grouped = ErrorMessages::new();

    for (field, rules) in &schema.fields {
        let value = values.get(field).cloned().unwrap_or_default();
        grouped.extend_field(field, run_rules(field, rules, &value));
        validated.insert(field.clone(), value);
    }

    debug!(
        target: LOG_TARGET,
        "validation finished: {} errors in {} fields",
        grouped.len(),
        grouped.fields().count()
    );

    let errors = if flatten_errors {
        Errors::Flat(grouped.flatten())
    } else {
        Errors::Grouped(grouped)
    };

    ValidationResult { validated, errors }
}

/// Errors of one validation run, in the shape that was asked for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Errors {
    Grouped(ErrorMessages),
    Flat(Vec<String>),
}

impl Errors {
    pub fn is_empty(&self) -> bool {
        match self {
            Errors::Grouped(grouped) => grouped.is_empty(),
            Errors::Flat(flat) => flat.is_empty(),
        }
    }

    /// Total number of messages.
    pub fn len(&self) -> usize {
        match self {
            Errors::Grouped(grouped) => grouped.len(),
            Errors::Flat(flat) => flat.len(),
        }
    }

    pub fn as_grouped(&self) -> Option<&ErrorMessages> {
        match self {
            Errors::Grouped(grouped) => Some(grouped),
            Errors::Flat(_) => None,
        }
    }

    pub fn as_flat(&self) -> Option<&[String]> {
        match self {
            Errors::Grouped(_) => None,
            Errors::Flat(flat) => Some(flat),
        }
    }

    /// All messages as one list, flattening grouped errors.
    pub fn into_flat(self) -> Vec<String> {
        match self {
            Errors::Grouped(grouped) => grouped.flatten(),
            Errors::Flat(flat) => flat,
        }
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Errors::Grouped(grouped) => write!(f, "{}", grouped),
            Errors::Flat(flat) => {
                for message in flat {
                    writeln!(f, "{}", message)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Errors {}

/// Validated values and errors of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Raw values for every schema field, in schema order
    pub validated: IndexMap<String, Value>,
    pub errors: Errors,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_parts(self) -> (IndexMap<String, Value>, Errors) {
        (self.validated, self.errors)
    }

    /// `Ok` with the validated values when there are no errors.
    pub fn into_result(self) -> Result<IndexMap<String, Value>, Errors> {
        if self.errors.is_empty() {
            Ok(self.validated)
        } else {
            Err(self.errors)
        }
    }
}
