//! Values a caller can write into a document.

use yaml_span::{CollectionStyle, ScalarStyle};
use yaml_rust2::yaml::Hash;
use yaml_rust2::Yaml;

/// A value to be written into a YAML document.
///
/// This is the input side of the editor: plain data plus an optional style
/// wrapper. Tags, anchors and aliases are unrepresentable by construction.
/// Equality ignores styling.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Vec<(Value, Value)>),
    /// A value with a requested output style.
    Styled(Box<Styled>),
}

/// A [`Value`] wrapped with the style it should be written in.
///
/// The scalar style applies if the wrapped value is a scalar; the
/// collection style if it is a sequence or mapping. Both default to `Any`,
/// which lets the encoder choose.
#[derive(Debug, Clone)]
pub struct Styled {
    pub value: Value,
    pub scalar_style: ScalarStyle,
    pub collection_style: CollectionStyle,
}

impl Value {
    /// Wrap this value with a requested scalar style.
    pub fn with_scalar_style(self, style: ScalarStyle) -> Value {
        Value::Styled(Box::new(Styled {
            value: self.unwrap_styled().0,
            scalar_style: style,
            collection_style: CollectionStyle::Any,
        }))
    }

    /// Wrap this value with a requested collection style.
    pub fn with_collection_style(self, style: CollectionStyle) -> Value {
        Value::Styled(Box::new(Styled {
            value: self.unwrap_styled().0,
            scalar_style: ScalarStyle::Any,
            collection_style: style,
        }))
    }

    /// Strip any style wrapper, returning the plain value and the styles
    /// that were requested for it.
    pub fn unwrap_styled(self) -> (Value, ScalarStyle, CollectionStyle) {
        match self {
            Value::Styled(styled) => (styled.value, styled.scalar_style, styled.collection_style),
            other => (other, ScalarStyle::Any, CollectionStyle::Any),
        }
    }

    /// The plain value beneath any style wrapper.
    pub fn plain(&self) -> &Value {
        match self {
            Value::Styled(styled) => styled.value.plain(),
            other => other,
        }
    }

    /// The requested scalar style (`Any` unless wrapped).
    pub fn scalar_style(&self) -> ScalarStyle {
        match self {
            Value::Styled(styled) => styled.scalar_style,
            _ => ScalarStyle::Any,
        }
    }

    /// The requested collection style (`Any` unless wrapped).
    pub fn collection_style(&self) -> CollectionStyle {
        match self {
            Value::Styled(styled) => styled.collection_style,
            _ => CollectionStyle::Any,
        }
    }

    /// Whether the plain value is a sequence or mapping.
    pub fn is_collection(&self) -> bool {
        matches!(self.plain(), Value::Sequence(_) | Value::Mapping(_))
    }

    /// Whether the plain value is an empty sequence or mapping.
    pub fn is_empty_collection(&self) -> bool {
        match self.plain() {
            Value::Sequence(items) => items.is_empty(),
            Value::Mapping(entries) => entries.is_empty(),
            _ => false,
        }
    }

    /// Whether the plain value is null.
    pub fn is_null(&self) -> bool {
        matches!(self.plain(), Value::Null)
    }

    /// Convert to a `yaml-rust2` value for key comparison and probing.
    ///
    /// Floats are carried in their canonical encoded form so that a
    /// converted value compares equal to the same value re-parsed.
    pub fn to_yaml(&self) -> Yaml {
        match self.plain() {
            Value::Null => Yaml::Null,
            Value::Bool(b) => Yaml::Boolean(*b),
            Value::Int(i) => Yaml::Integer(*i),
            Value::Float(f) => Yaml::Real(crate::encode::float_repr(*f)),
            Value::String(s) => Yaml::String(s.clone()),
            Value::Sequence(items) => {
                Yaml::Array(items.iter().map(Value::to_yaml).collect())
            }
            Value::Mapping(entries) => {
                let mut hash = Hash::new();
                for (key, value) in entries {
                    hash.insert(key.to_yaml(), value.to_yaml());
                }
                Yaml::Hash(hash)
            }
            Value::Styled(_) => unreachable!("plain() strips style wrappers"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self.plain(), other.plain()) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_style() {
        let plain = Value::from("text");
        let styled = Value::from("text").with_scalar_style(ScalarStyle::Literal);
        assert_eq!(plain, styled);
    }

    #[test]
    fn test_to_yaml() {
        assert_eq!(Value::from(3).to_yaml(), Yaml::Integer(3));
        assert_eq!(Value::Null.to_yaml(), Yaml::Null);
        assert_eq!(
            Value::from(vec![1, 2]).to_yaml(),
            Yaml::Array(vec![Yaml::Integer(1), Yaml::Integer(2)])
        );
    }

    #[test]
    fn test_styled_accessors() {
        let value = Value::from(vec![Value::from(1)])
            .with_collection_style(CollectionStyle::Flow);
        assert_eq!(value.collection_style(), CollectionStyle::Flow);
        assert!(value.is_collection());
        assert!(!value.is_empty_collection());
    }
}
