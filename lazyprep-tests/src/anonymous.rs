use lazyprep::{Connection, Session};

pub async fn anonymous<C: Connection>(session: &mut Session<C>) {
    let queries = [
        "SELECT 1",
        "SELECT $1::int + 1",
        "SELECT $1::text || $2::text",
    ];
    for (i, query) in queries.into_iter().enumerate() {
        session
            .prepare("", query)
            .expect("The unnamed statement can always be redefined");
        let mut invocation = session.invoke("");
        for value in 0..i {
            invocation.append(value as i32).expect("Failed to append");
        }
        invocation
            .execute()
            .await
            .expect("Failed to execute the unnamed statement");
        assert!(!session.registry().is_registered(""));
    }
    // Executing again prepares it again
    session
        .invoke("")
        .append("a")
        .expect("Failed to append")
        .append("b")
        .expect("Failed to append")
        .execute()
        .await
        .expect("Failed to execute the unnamed statement again");
    assert_eq!(
        session.registry().get("").map(|v| v.sql()),
        Some("SELECT $1::text || $2::text")
    );
}
