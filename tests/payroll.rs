#[cfg(test)]
mod tests {
    use indoc::indoc;
    use lazyprep::{
        AsValue, Binary, Driver, Session, StatementError, Value, WireValue, statement_error,
    };
    use lazyprep_memory::{MemoryConnection, MemoryDriver};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use time::{
        Date,
        macros::{date, datetime},
    };
    use uuid::Uuid;

    struct Raise {
        employee: Uuid,
        amount: Decimal,
        effective: Date,
        note: Option<String>,
    }

    async fn connect() -> Session<MemoryConnection> {
        let connection = MemoryDriver::new()
            .connect("memory://".into())
            .await
            .expect("Could not open the memory connection");
        Session::new(connection)
    }

    #[tokio::test]
    async fn raises() {
        let mut session = connect().await;
        session
            .prepare(
                "raise",
                indoc! {"
                    UPDATE employee
                    SET salary = salary + $2, note = $4
                    WHERE id = $1 AND hired < $3
                "},
            )
            .unwrap();
        let raises = [
            Raise {
                employee: Uuid::from_str("a3f1e2c4-8b0d-4b6e-9d2a-55c1f0e7b9a1").unwrap(),
                amount: Decimal::from_str("1250.50").unwrap(),
                effective: date!(2025 - 03 - 01),
                note: Some("annual review".into()),
            },
            Raise {
                employee: Uuid::from_str("0c7d5b8e-2f4a-4d31-a6e9-0b9f3c2d1e55").unwrap(),
                amount: Decimal::from_str("-10").unwrap(),
                effective: date!(2025 - 04 - 15),
                note: None,
            },
        ];
        for raise in raises {
            let result = session
                .invoke("raise")
                .append(raise.employee)
                .unwrap()
                .append(raise.amount)
                .unwrap()
                .append(raise.effective)
                .unwrap()
                .append(raise.note)
                .unwrap()
                .execute()
                .await
                .expect("Failed to execute raise");
            assert_eq!(result.rows.len(), 1);
        }
        let connection = session.connection();
        assert_eq!(connection.prepare_count("raise"), 1);
        assert_eq!(connection.execute_count("raise"), 2);
    }

    #[tokio::test]
    async fn echo_row() {
        let mut session = connect().await;
        session
            .prepare("echo", "SELECT $1, $2, $3, $4, $5")
            .unwrap();
        let result = session
            .invoke("echo")
            .append(datetime!(2024-02-29 23:59:59.5))
            .unwrap()
            .append(Binary::new(vec![0u8, 1, 2]))
            .unwrap()
            .append_nullable("hidden", false)
            .unwrap()
            .append(f32::NAN)
            .unwrap()
            .append(vec![Some(1), None, Some(3)])
            .unwrap()
            .execute()
            .await
            .unwrap();
        assert_eq!(result.column("$2"), Some(1));
        assert_eq!(
            &*result.rows[0],
            [
                WireValue::Text("2024-02-29 23:59:59.500000".into()),
                WireValue::Binary(vec![0u8, 1, 2].into()),
                WireValue::Null,
                WireValue::Text("NaN".into()),
                WireValue::Text("{1,NULL,3}".into()),
            ]
        );
    }

    #[tokio::test]
    async fn names_and_values() {
        assert_eq!("Xavier".as_value(), Value::Varchar(Some("Xavier".into())));
        assert!(Binary::new(vec![0u8]).as_value().is_binary());
        assert!(!"Xavier".as_value().is_binary());

        let mut session = connect().await;
        let error = session
            .prepare("bad name", "SELECT 1")
            .expect_err("Names with spaces are refused");
        assert!(matches!(
            statement_error(&error),
            Some(StatementError::InvalidName { .. })
        ));
        assert!(!session.exists("bad name"));
    }
}
