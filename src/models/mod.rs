pub mod thread;

/// Serde adapter for the API's integer flags.
///
/// Zero decodes to `false`, any other integer to `true`.
/// Encoding writes `1` or `0`.
pub(crate) mod int_bool {
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn deserialize<'de, D>(d: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(d)?;
        Ok(value != 0)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub(crate) fn serialize<S>(value: &bool, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_u8(u8::from(*value))
    }
}

pub(crate) mod macros {
    macro_rules! str_opt_ref {
        ($x:expr) => {
            $x.as_ref().map(|x| x.as_ref())
        };
    }

    pub(crate) use str_opt_ref;
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Flag {
        #[serde(default, with = "super::int_bool")]
        on: bool,
    }

    #[test]
    fn zero_is_false_and_nonzero_is_true() {
        let decode = |json: &str| serde_json::from_str::<Flag>(json).unwrap().on;
        assert!(!decode(r#"{"on":0}"#));
        assert!(decode(r#"{"on":1}"#));
        assert!(decode(r#"{"on":7}"#));
        assert!(decode(r#"{"on":-1}"#));
        assert!(!decode("{}"));
    }

    #[test]
    fn encodes_as_one_or_zero() {
        let on = serde_json::to_string(&Flag { on: true }).unwrap();
        let off = serde_json::to_string(&Flag { on: false }).unwrap();
        assert_eq!(on, r#"{"on":1}"#);
        assert_eq!(off, r#"{"on":0}"#);
    }

    #[test]
    fn rejects_non_integer_flags() {
        assert!(serde_json::from_str::<Flag>(r#"{"on":true}"#).is_err());
        assert!(serde_json::from_str::<Flag>(r#"{"on":"1"}"#).is_err());
    }
}
