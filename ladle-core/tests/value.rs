#[cfg(test)]
mod tests {
    use ladle_core::{AsValue, Value};
    use rust_decimal::Decimal;
    use std::{borrow::Cow, str::FromStr};
    use time::{Month, macros::datetime};
    use uuid::Uuid;

    #[test]
    fn value_bool() {
        let val: Value = true.into();
        assert_eq!(val, Value::Boolean(Some(true)));
        assert_ne!(val, Value::Boolean(None));
        assert_ne!(val, Value::Varchar(Some("true".into())));
        assert_eq!(bool::try_from_value(val).unwrap(), true);
        assert_eq!(bool::try_from_value((8 as i16).into()).unwrap(), true);
        assert_eq!(bool::try_from_value((0 as u64).into()).unwrap(), false);
        assert_eq!(bool::try_from_value("f".into()).unwrap(), false);
        assert!(bool::try_from_value((0.5 as f32).into()).is_err());
        assert!(bool::try_from_value("maybe".into()).is_err());
    }

    #[test]
    fn value_integers() {
        assert_eq!(i8::try_from_value((99 as u8).into()).unwrap(), 99);
        assert!(i8::try_from_value((200 as u8).into()).is_err());
        assert!(i8::try_from_value((0.1 as f64).into()).is_err());
        assert_eq!(i16::try_from_value((-29 as i8).into()).unwrap(), -29);
        assert_eq!(u32::try_from_value(Value::Int64(Some(4_000_000_000))).unwrap(), 4_000_000_000);
        assert!(u32::try_from_value(Value::Int64(Some(-1))).is_err());
        assert_eq!(i64::try_from_value(Value::Varchar(Some("-42".into()))).unwrap(), -42);
        assert_eq!(i64::try_from_value(Value::Varchar(Some("'17'".into()))).unwrap(), 17);
        assert!(i64::try_from_value(Value::Varchar(Some("17 apples".into()))).is_err());
        assert!(u8::try_from_value(Value::Varchar(Some("300".into()))).is_err());
        assert_eq!(
            u64::try_from_value(Decimal::from_str("12.000").unwrap().into()).unwrap(),
            12
        );
        assert!(u64::try_from_value(Decimal::from_str("12.5").unwrap().into()).is_err());
        assert!(i32::try_from_value(Value::Null).is_err());
    }

    #[test]
    fn value_floats() {
        assert_eq!(f64::try_from_value((3 as i32).into()).unwrap(), 3.0);
        assert_eq!(f32::try_from_value(Value::Float64(Some(0.5))).unwrap(), 0.5);
        assert_eq!(f64::try_from_value("2.5e3".into()).unwrap(), 2500.0);
        assert_eq!(
            f64::try_from_value(Decimal::from_str("1.25").unwrap().into()).unwrap(),
            1.25
        );
        assert!(f64::try_from_value("abc".into()).is_err());
    }

    #[test]
    fn value_decimal() {
        assert_eq!(
            Decimal::try_from_value("-0.05".into()).unwrap(),
            Decimal::from_str("-0.05").unwrap()
        );
        assert_eq!(
            Decimal::try_from_value((7 as u16).into()).unwrap(),
            Decimal::from(7)
        );
        assert!(Decimal::try_from_value("1.2.3".into()).is_err());
    }

    #[test]
    fn value_text() {
        let val: Value = "hello".into();
        assert_eq!(val, Value::Varchar(Some("hello".into())));
        assert_eq!(String::try_from_value(val).unwrap(), "hello");
        assert_eq!(String::parse("'it''s'").unwrap(), "it's");
        assert!(String::parse("'unterminated").is_err());
        let cow: Cow<'static, str> = AsValue::try_from_value("borrowed".into()).unwrap();
        assert_eq!(cow, "borrowed");
        assert!(String::try_from_value((1 as i32).into()).is_err());
    }

    #[test]
    fn value_blob_and_uuid() {
        let blob = Vec::<u8>::try_from_value(Value::Varchar(Some("\\xCAFE".into()))).unwrap();
        assert_eq!(blob, [0xCA, 0xFE]);
        let uuid = Uuid::parse_str("5e915574-bb30-4430-98cf-c5854f61fbbd").unwrap();
        assert_eq!(
            Uuid::try_from_value(Value::Varchar(Some(uuid.to_string()))).unwrap(),
            uuid
        );
        assert_eq!(
            Uuid::try_from_value(Value::Blob(Some(uuid.as_bytes().as_slice().into()))).unwrap(),
            uuid
        );
        assert!(Uuid::try_from_value("not-a-uuid".into()).is_err());
    }

    #[test]
    fn value_time() {
        let date = time::Date::try_from_value("2025-01-31".into()).unwrap();
        assert_eq!(date.month(), Month::January);
        let time = time::Time::try_from_value("08:30".into()).unwrap();
        assert_eq!((time.hour(), time.minute()), (8, 30));
        let timestamp = time::PrimitiveDateTime::try_from_value("2025-01-31 08:30:15".into()).unwrap();
        assert_eq!(timestamp, datetime!(2025-01-31 08:30:15));
        let with_zone =
            time::OffsetDateTime::try_from_value("2025-01-31T08:30:15+02:00".into()).unwrap();
        assert_eq!(with_zone, datetime!(2025-01-31 08:30:15 +02:00));
        let utc = time::OffsetDateTime::try_from_value(timestamp.into()).unwrap();
        assert_eq!(utc, datetime!(2025-01-31 08:30:15 UTC));
        assert!(time::Date::try_from_value("31/01/2025".into()).is_err());
    }

    #[test]
    fn value_option_and_box() {
        assert_eq!(Option::<i32>::try_from_value(Value::Null).unwrap(), None);
        assert_eq!(Option::<i32>::try_from_value(Value::Int32(None)).unwrap(), None);
        assert_eq!(Option::<i32>::try_from_value((5 as i64).into()).unwrap(), Some(5));
        assert_eq!(Option::<i32>::as_empty_value(), Value::Int32(None));
        assert_eq!(None::<String>.as_value(), Value::Varchar(None));
        assert_eq!(Option::<i64>::parse("NULL").unwrap(), None);
        assert_eq!(*Box::<u16>::try_from_value((9 as u8).into()).unwrap(), 9);
    }
}
