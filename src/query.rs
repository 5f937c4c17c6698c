use chrono::{DateTime, SecondsFormat, Utc};
use url::form_urlencoded;

/// One entry in a parameter object's field table: the query key, the
/// effective value, and an optional declared default.
///
/// The constructors compute zero-ness per type: empty strings, `0`, `false`,
/// `None` and empty slices all count as "not set". A field that is not set
/// falls back to its declared default, or is skipped entirely if it has
/// none.
#[derive(Debug, Clone)]
pub struct QueryField {
    key: &'static str,
    value: FieldValue,
    default: Option<&'static str>,
}

#[derive(Debug, Clone)]
enum FieldValue {
    /// Scalar field; `None` means the zero value for its type
    Scalar(Option<String>),
    /// Repeated field; one query entry is emitted per element
    Repeated(Vec<String>),
}

impl QueryField {
    /// String field; skipped when empty
    pub fn text(key: &'static str, value: &str) -> Self {
        let value = if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
        QueryField {
            key,
            value: FieldValue::Scalar(value),
            default: None,
        }
    }

    /// Integer field; skipped when zero
    pub fn int(key: &'static str, value: u64) -> Self {
        let value = if value == 0 {
            None
        } else {
            Some(value.to_string())
        };
        QueryField {
            key,
            value: FieldValue::Scalar(value),
            default: None,
        }
    }

    /// Boolean flag; skipped when false
    pub fn flag(key: &'static str, value: bool) -> Self {
        let value = if value { Some("true".to_string()) } else { None };
        QueryField {
            key,
            value: FieldValue::Scalar(value),
            default: None,
        }
    }

    /// RFC3339 timestamp field; skipped when absent
    pub fn time(key: &'static str, value: Option<DateTime<Utc>>) -> Self {
        let value = value.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true));
        QueryField {
            key,
            value: FieldValue::Scalar(value),
            default: None,
        }
    }

    /// Repeated field; emits one `key=value` pair per element, in input
    /// order, under the same key
    pub fn repeated(key: &'static str, values: &[String]) -> Self {
        QueryField {
            key,
            value: FieldValue::Repeated(values.to_vec()),
            default: None,
        }
    }

    /// Attach a declared default, used when the field holds its zero value
    pub fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }
}

/// Declarative per-field query metadata for a parameter object.
///
/// Implementations list every field once; the generic [`encode`] function
/// consumes the table. No per-endpoint encoding logic exists anywhere else.
pub trait QueryParams {
    /// The field table for this parameter object
    fn fields(&self) -> Vec<QueryField>;
}

/// Encode a parameter object into a percent-encoded query string.
///
/// `None` means no parameter object was supplied at all and yields the empty
/// string. `Some` of an all-blank object yields the declared defaults — the
/// two cases are distinct by contract.
pub fn encode<P: QueryParams>(params: Option<&P>) -> String {
    let Some(params) = params else {
        return String::new();
    };

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for field in params.fields() {
        match field.value {
            FieldValue::Scalar(Some(ref value)) => {
                serializer.append_pair(field.key, value);
            }
            FieldValue::Scalar(None) => {
                if let Some(default) = field.default {
                    serializer.append_pair(field.key, default);
                }
            }
            FieldValue::Repeated(ref values) => {
                for value in values {
                    serializer.append_pair(field.key, value);
                }
            }
        }
    }
    serializer.finish()
}
