//! Construction of GraphQL query documents.
//!
//! Entity, field, argument and variable names are validated against the
//! GraphQL name grammar. Filter values never appear in the query text: they
//! are bound to declared variables and sent next to it, so ids and cursors
//! coming from the server cannot alter the query structure.

use crate::error::DataError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Write;

/// Variable bound by [`QueryBuilder::first`].
pub const PAGE_SIZE_VARIABLE: &str = "pageSize";

/// A rendered query, serialized as the `{"query": ..., "variables": ...}`
/// request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphQlQuery {
    query: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    variables: Map<String, Value>,
}

impl GraphQlQuery {
    /// The query document.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.query
    }

    /// Values of the declared variables.
    #[must_use]
    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }
}

#[derive(Debug, Clone)]
enum Selection {
    Field(String),
    Object(String, Vec<String>),
}

#[derive(Debug, Clone)]
struct Variable {
    name: String,
    kind: String,
    value: Value,
}

/// Builds a single top-level collection query such as
/// `query ($pageSize: Int, $lastId: ID) { ticks(first: $pageSize, ..., where: { id_gt: $lastId }) { ... } }`.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    collection: String,
    first: bool,
    order_by: Option<String>,
    filters: Vec<(String, String)>,
    variables: Vec<Variable>,
    selection: Vec<Selection>,
}

impl QueryBuilder {
    /// Starts a query over the given collection (`pools`, `ticks`, ...).
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            first: false,
            order_by: None,
            filters: Vec::new(),
            variables: Vec::new(),
            selection: Vec::new(),
        }
    }

    /// Limits the page size, bound to `$pageSize: Int`.
    #[must_use]
    pub fn first(mut self, first: u32) -> Self {
        self.first = true;
        self.variables.push(Variable {
            name: PAGE_SIZE_VARIABLE.to_string(),
            kind: "Int".to_string(),
            value: Value::from(first),
        });
        self
    }

    /// Orders ascending by the given field.
    #[must_use]
    pub fn order_by_asc(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    /// Adds a `where` condition comparing `key` with the variable `$variable`
    /// of GraphQL type `kind`, e.g. `filter("id_gt", "lastId", "ID", cursor)`.
    #[must_use]
    pub fn filter(
        mut self,
        key: impl Into<String>,
        variable: impl Into<String>,
        kind: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        let variable = variable.into();
        self.filters.push((key.into(), variable.clone()));
        self.variables.push(Variable {
            name: variable,
            kind: kind.into(),
            value: value.into(),
        });
        self
    }

    /// Selects a scalar field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.selection.push(Selection::Field(name.into()));
        self
    }

    /// Selects scalar fields of a nested object.
    #[must_use]
    pub fn object(mut self, name: impl Into<String>, fields: &[&str]) -> Self {
        self.selection.push(Selection::Object(
            name.into(),
            fields.iter().map(|f| (*f).to_string()).collect(),
        ));
        self
    }

    /// Validates names and renders the query.
    ///
    /// # Errors
    /// Returns [`DataError::InvalidQuery`] if a name or type is not valid
    /// GraphQL, a variable is declared twice, or nothing is selected.
    pub fn build(&self) -> Result<GraphQlQuery, DataError> {
        validate_name(&self.collection)?;
        if self.selection.is_empty() {
            return Err(DataError::InvalidQuery(format!(
                "no fields selected on `{}`",
                self.collection
            )));
        }

        let mut declarations = Vec::with_capacity(self.variables.len());
        let mut variables = Map::new();
        for variable in &self.variables {
            validate_name(&variable.name)?;
            validate_type(&variable.kind)?;
            if variables
                .insert(variable.name.clone(), variable.value.clone())
                .is_some()
            {
                return Err(DataError::InvalidQuery(format!(
                    "variable `${}` declared twice",
                    variable.name
                )));
            }
            declarations.push(format!("${}: {}", variable.name, variable.kind));
        }

        let mut arguments = Vec::new();
        if self.first {
            arguments.push(format!("first: ${PAGE_SIZE_VARIABLE}"));
        }
        if let Some(field) = &self.order_by {
            validate_name(field)?;
            arguments.push(format!("orderBy: {field}, orderDirection: asc"));
        }
        if !self.filters.is_empty() {
            let mut conditions = Vec::with_capacity(self.filters.len());
            for (key, variable) in &self.filters {
                validate_name(key)?;
                conditions.push(format!("{key}: ${variable}"));
            }
            arguments.push(format!("where: {{ {} }}", conditions.join(", ")));
        }

        let mut query = String::new();
        if !declarations.is_empty() {
            let _ = write!(query, "query ({}) ", declarations.join(", "));
        }
        let _ = write!(query, "{{ {}", self.collection);
        if !arguments.is_empty() {
            let _ = write!(query, "({})", arguments.join(", "));
        }
        query.push_str(" {");
        for selection in &self.selection {
            match selection {
                Selection::Field(name) => {
                    validate_name(name)?;
                    let _ = write!(query, " {name}");
                }
                Selection::Object(name, fields) => {
                    validate_name(name)?;
                    if fields.is_empty() {
                        return Err(DataError::InvalidQuery(format!(
                            "no fields selected on `{name}`"
                        )));
                    }
                    let _ = write!(query, " {name} {{");
                    for field in fields {
                        validate_name(field)?;
                        let _ = write!(query, " {field}");
                    }
                    query.push_str(" }");
                }
            }
        }
        query.push_str(" } }");

        Ok(GraphQlQuery { query, variables })
    }
}

/// GraphQL `Name`: `/[_A-Za-z][_0-9A-Za-z]*/`.
fn validate_name(name: &str) -> Result<(), DataError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(DataError::InvalidQuery(format!("`{name}` is not a valid GraphQL name")))
    }
}

/// Named or list type, optionally non-null: `ID`, `Int!`, `[ID!]!`.
fn validate_type(kind: &str) -> Result<(), DataError> {
    let inner = kind.strip_suffix('!').unwrap_or(kind);
    let inner = match inner.strip_prefix('[') {
        Some(rest) => match rest.strip_suffix(']') {
            Some(item) => item.strip_suffix('!').unwrap_or(item),
            None => kind,
        },
        None => inner,
    };
    validate_name(inner)
        .map_err(|_| DataError::InvalidQuery(format!("`{kind}` is not a valid GraphQL type")))
}
