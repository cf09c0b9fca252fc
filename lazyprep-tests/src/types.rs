use lazyprep::{Connection, Session, WireValue};
use time::{Date, Month, PrimitiveDateTime, Time};
use uuid::Uuid;

pub async fn types<C: Connection>(session: &mut Session<C>) {
    session
        .prepare(
            "insert_order",
            "INSERT INTO orders (id, placed, quantity, price, note, tags) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .expect("Failed to define insert_order");
    let placed = PrimitiveDateTime::new(
        Date::from_calendar_date(2025, Month::January, 31).unwrap(),
        Time::from_hms(8, 15, 0).unwrap(),
    );
    let mut invocation = session.invoke("insert_order");
    invocation
        .append(Uuid::parse_str("5e915574-bb30-4430-98cf-c5854f61fbbd").unwrap())
        .expect("Failed to append the id")
        .append(placed)
        .expect("Failed to append the date")
        .append(3_u16)
        .expect("Failed to append the quantity")
        .append(19.5_f64)
        .expect("Failed to append the price")
        .append(None::<String>)
        .expect("Failed to append the note")
        .append(vec!["new", "priority high"])
        .expect("Failed to append the tags");
    assert_eq!(
        invocation.params().as_slice(),
        &[
            WireValue::Text("5e915574-bb30-4430-98cf-c5854f61fbbd".into()),
            WireValue::Text("2025-01-31 08:15:00".into()),
            WireValue::Text("3".into()),
            WireValue::Text("19.5".into()),
            WireValue::Null,
            WireValue::Text("{new,\"priority high\"}".into()),
        ]
    );
    invocation
        .execute()
        .await
        .expect("Failed to execute insert_order");
}
