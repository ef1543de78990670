use std::{convert::Infallible, str::FromStr};

use sea_orm::{ColumnTrait, Condition, EntityTrait, Order, Value};

use super::RepositoryError;

//
// ──────────────────────────────────────────────────────────
// Filter
// ──────────────────────────────────────────────────────────
//

/// A single predicate applied to one column.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column = value`
    Equals(Value),
    /// `column IN (values...)`
    OneOf(Vec<Value>),
    /// `column LIKE '%text%'`
    Contains(String),
}

/// Predicates keyed by field name, combined with AND.
///
/// Field names are the snake_case column names of the target entity. A name
/// the entity does not know is reported as [`RepositoryError::UnknownField`]
/// when the query is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    entries: Vec<(String, Filter)>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, filter: Filter) {
        self.entries.push((field.into(), filter));
    }

    pub fn equals(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(field, Filter::Equals(value.into()));
        self
    }

    pub fn one_of<V>(mut self, field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Value>,
    {
        self.push(
            field,
            Filter::OneOf(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    pub fn contains(mut self, field: impl Into<String>, text: impl Into<String>) -> Self {
        self.push(field, Filter::Contains(text.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Filter)> {
        self.entries.iter().map(|(field, filter)| (field.as_str(), filter))
    }

    pub(crate) fn to_condition<E>(&self) -> Result<Condition, RepositoryError>
    where
        E: EntityTrait,
    {
        let mut condition = Condition::all();

        for (field, filter) in self.iter() {
            let column = resolve_column::<E>(field)?;

            condition = condition.add(match filter {
                Filter::Equals(value) => column.eq(value.clone()),
                Filter::OneOf(values) => column.is_in(values.iter().cloned()),
                Filter::Contains(text) => column.contains(text.as_str()),
            });
        }

        Ok(condition)
    }
}

//
// ──────────────────────────────────────────────────────────
// Ordering
// ──────────────────────────────────────────────────────────
//

/// Sort key. The textual form is a field name, prefixed with `-` for
/// descending order (`"-priority"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    field: String,
    descending: bool,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    pub(crate) fn resolve<E>(&self) -> Result<(E::Column, Order), RepositoryError>
    where
        E: EntityTrait,
    {
        let column = resolve_column::<E>(&self.field)?;
        let order = if self.descending {
            Order::Desc
        } else {
            Order::Asc
        };
        Ok((column, order))
    }
}

impl FromStr for OrderBy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.strip_prefix('-') {
            Some(field) => Self::desc(field),
            None => Self::asc(s),
        })
    }
}

fn resolve_column<E>(field: &str) -> Result<E::Column, RepositoryError>
where
    E: EntityTrait,
{
    E::Column::from_str(field).map_err(|_| RepositoryError::UnknownField(field.to_string()))
}
