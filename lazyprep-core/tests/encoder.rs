#[cfg(test)]
mod tests {
    use lazyprep_core::{
        AsValue, Binary, FORMAT_BINARY, FORMAT_TEXT, MAX_WIRE_LENGTH, StatementError, Value,
        WireValue, encode_parameters, encode_value, statement_error, truncate_at_nul,
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use time::{Date, Month, PrimitiveDateTime, Time, UtcOffset};
    use uuid::Uuid;

    fn text(value: impl AsValue) -> String {
        match encode_value(value.as_value(), true).expect("Failed to encode") {
            WireValue::Text(v) => v,
            other => panic!("Expected a text value, got {other:?}"),
        }
    }

    #[test]
    fn encode_scenario_find() {
        let params = encode_parameters([("Xavier".as_value(), true), (50000_i32.as_value(), true)])
            .expect("Failed to encode the parameters");
        assert_eq!(
            params.as_slice(),
            &[
                WireValue::Text("Xavier".into()),
                WireValue::Text("50000".into())
            ]
        );
        assert_eq!(params.get(1), Some(&WireValue::Text("Xavier".into())));
        assert_eq!(params.get(2), Some(&WireValue::Text("50000".into())));
        assert_eq!(params.get(0), None);
        assert_eq!(params.get(3), None);
        assert_eq!(params.formats(), vec![FORMAT_TEXT, FORMAT_TEXT]);
        assert_eq!(params.lengths(), vec![6, 5]);
    }

    #[test]
    fn encode_text_round_trip() {
        for value in ["", "plain", "with space", "quote ' and \"", "ünïcödé ✓", "a,b{c}"] {
            assert_eq!(text(value), value);
        }
    }

    #[test]
    fn encode_text_truncated_at_zero_byte() {
        assert_eq!(text("ab\0cd"), "ab");
        assert_eq!(text("\0leading"), "");
        assert_eq!(text(String::from("trailing\0")), "trailing");
        assert_eq!(text("one\0two\0three"), "one");
        assert_eq!(text('\0'), "");
        let value = "prefix\0suffix";
        let k = value.find('\0').unwrap();
        assert_eq!(text(value), &value[..k]);
        assert_eq!(truncate_at_nul(value), "prefix");
        assert_eq!(truncate_at_nul("clean"), "clean");
    }

    #[test]
    fn encode_binary_keeps_every_byte() {
        let bytes = vec![0_u8, 1, 0, 255, 0];
        let encoded = encode_value(Binary::from(bytes.clone()).as_value(), true).unwrap();
        assert_eq!(encoded, WireValue::Binary(bytes.clone().into()));
        assert_eq!(encoded.format(), FORMAT_BINARY);
        assert_eq!(encoded.wire_length(), 5);
        assert_eq!(encoded.as_bytes(), Some(&bytes[..]));
        let empty: &[u8] = &[];
        assert_eq!(
            encode_value(empty.as_value(), true).unwrap(),
            WireValue::Binary(Vec::new().into())
        );
    }

    #[test]
    fn encode_nulls() {
        assert_eq!(encode_value(Value::Null, true).unwrap(), WireValue::Null);
        assert_eq!(
            encode_value(None::<&str>.as_value(), true).unwrap(),
            WireValue::Null
        );
        assert_eq!(
            encode_value(None::<Binary>.as_value(), true).unwrap(),
            WireValue::Null
        );
        assert_eq!(
            encode_value("present".as_value(), false).unwrap(),
            WireValue::Null
        );
        assert_eq!(
            encode_value(Binary::new(*b"\0").as_value(), false).unwrap(),
            WireValue::Null
        );
        assert_eq!(
            encode_value(None::<i32>.as_value(), false).unwrap(),
            WireValue::Null
        );
        assert_eq!(WireValue::Null.wire_length(), -1);
        assert_eq!(WireValue::Null.format(), FORMAT_TEXT);
    }

    #[test]
    fn encode_scalars() {
        assert_eq!(text(true), "true");
        assert_eq!(text(false), "false");
        assert_eq!(text(-128_i8), "-128");
        assert_eq!(text(i64::MIN), "-9223372036854775808");
        assert_eq!(
            text(u128::MAX),
            "340282366920938463463374607431768211455"
        );
        assert_eq!(text(1.5_f64), "1.5");
        assert_eq!(text(0.25_f32), "0.25");
        assert_eq!(text(f64::NAN), "NaN");
        assert_eq!(text(f64::INFINITY), "Infinity");
        assert_eq!(text(f32::NEG_INFINITY), "-Infinity");
        assert_eq!(text(Decimal::from_str("-12.340").unwrap()), "-12.340");
        assert_eq!(
            text(Uuid::parse_str("5E915574-BB30-4430-98CF-C5854F61FBBD").unwrap()),
            "5e915574-bb30-4430-98cf-c5854f61fbbd"
        );
    }

    #[test]
    fn encode_temporal() {
        let date = Date::from_calendar_date(2024, Month::March, 7).unwrap();
        assert_eq!(text(date), "2024-03-07");
        assert_eq!(text(Time::from_hms(9, 5, 0).unwrap()), "09:05:00");
        assert_eq!(
            text(Time::from_hms_micro(23, 59, 59, 120).unwrap()),
            "23:59:59.000120"
        );
        let timestamp = PrimitiveDateTime::new(date, Time::from_hms(12, 30, 45).unwrap());
        assert_eq!(text(timestamp), "2024-03-07 12:30:45");
        let with_zone = timestamp.assume_offset(UtcOffset::from_hms(-5, -30, 0).unwrap());
        assert_eq!(text(with_zone), "2024-03-07 12:30:45-05:30");
        let utc = timestamp.assume_utc();
        assert_eq!(text(utc), "2024-03-07 12:30:45+00:00");

        // Local mean time of Amsterdam
        let amsterdam = PrimitiveDateTime::new(
            Date::from_calendar_date(1900, Month::January, 1).unwrap(),
            Time::from_hms(12, 0, 0).unwrap(),
        )
        .assume_offset(UtcOffset::from_hms(0, 19, 32).unwrap());
        assert_eq!(text(amsterdam), "1900-01-01 12:00:00+00:19:32");
        let behind = timestamp.assume_offset(UtcOffset::from_hms(-4, -56, -2).unwrap());
        assert_eq!(text(behind), "2024-03-07 12:30:45-04:56:02");

        // Microsecond precision
        assert_eq!(
            text(Time::from_hms_nano(1, 2, 3, 999).unwrap()),
            "01:02:03"
        );
        assert_eq!(
            text(Time::from_hms_nano(1, 2, 3, 1_500).unwrap()),
            "01:02:03.000001"
        );
    }

    #[test]
    fn encode_lists() {
        assert_eq!(text(vec![1, 2, 3]), "{1,2,3}");
        assert_eq!(text(Vec::<i32>::new()), "{}");
        assert_eq!(text(vec![Some("a"), None, Some("b c")]), "{a,NULL,\"b c\"}");
        assert_eq!(
            text(vec!["quote\"", "back\\slash", "", "null"]),
            "{\"quote\\\"\",\"back\\\\slash\",\"\",\"null\"}"
        );
        assert_eq!(text(vec![vec![1, 2], vec![3, 4]]), "{{1,2},{3,4}}");
        assert_eq!(text(vec!["ab\0cd", "ef"]), "{ab,ef}");
    }

    #[test]
    fn encode_errors() {
        let error = encode_value(vec![Binary::new(*b"x")].as_value(), true)
            .expect_err("Binary inside a list must not be encodable");
        assert!(matches!(
            statement_error(&error),
            Some(StatementError::EncodeError { index: None, .. })
        ));

        let ancient = Date::from_calendar_date(-44, Month::March, 15).unwrap();
        let error = encode_parameters([(1_i32.as_value(), true), (ancient.as_value(), true)])
            .expect_err("Negative years must not be encodable");
        assert!(matches!(
            statement_error(&error),
            Some(StatementError::EncodeError { index: Some(2), .. })
        ));
        assert!(format!("{error}").contains("$2"));

        // Lengths travel as signed 32 bit integers, -1 being NULL
        #[cfg(target_pointer_width = "64")]
        {
            let huge = Binary::from(vec![0_u8; MAX_WIRE_LENGTH + 1]);
            let error = encode_parameters([(huge.as_value(), true)])
                .expect_err("Parameters longer than the wire allows must not be encodable");
            assert!(matches!(
                statement_error(&error),
                Some(StatementError::EncodeError { index: Some(1), .. })
            ));
        }
        assert_eq!(
            WireValue::Binary(vec![1_u8; 3].into()).wire_length(),
            3
        );

        // Null wins over the value that would fail
        assert_eq!(
            encode_value(ancient.as_value(), false).unwrap(),
            WireValue::Null
        );
    }

    #[test]
    fn wire_value_display() {
        assert_eq!(WireValue::Null.to_string(), "NULL");
        assert_eq!(WireValue::Text("it's".into()).to_string(), "'it''s'");
        assert_eq!(
            WireValue::Binary(vec![0xde, 0xad].into()).to_string(),
            "'\\xdead'"
        );
        let params = encode_parameters([(Value::from("a"), true), (Value::Null, true)]).unwrap();
        assert_eq!(params.to_string(), "[$1='a', $2=NULL]");
    }
}
