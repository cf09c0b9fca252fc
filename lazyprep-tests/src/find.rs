use indoc::indoc;
use lazyprep::{Connection, Session, WireValue};

pub async fn find<C: Connection>(session: &mut Session<C>) {
    const FIND: &str = indoc! {"
        SELECT * FROM employee
        WHERE name = $1 AND salary > $2
    "};

    // Setup
    session
        .prepare("find", FIND)
        .expect("Failed to define find");
    assert!(session.exists("find"));
    assert!(!session.registry().is_registered("find"));

    // First execution prepares it
    let mut invocation = session.invoke("find");
    assert!(invocation.exists());
    invocation
        .append("Xavier")
        .expect("Failed to append the name")
        .append(50000)
        .expect("Failed to append the salary");
    assert_eq!(
        invocation.params().as_slice(),
        &[
            WireValue::Text("Xavier".into()),
            WireValue::Text("50000".into())
        ]
    );
    invocation
        .execute()
        .await
        .expect("Failed to execute find the first time");
    assert!(session.registry().is_registered("find"));

    // Later executions reuse it
    for (name, salary) in [("Yvonne", 10), ("Zachary", 70000)] {
        session
            .invoke("find")
            .append(name)
            .expect("Failed to append the name")
            .append(salary)
            .expect("Failed to append the salary")
            .execute()
            .await
            .expect("Failed to execute find again");
    }
    assert!(session.registry().is_registered("find"));
    assert!(session.connection().is_prepared("find"));

    // Redefining it the same way keeps the registration
    session
        .prepare("find", FIND)
        .expect("Failed to define find again with the same query");
    assert!(session.registry().is_registered("find"));
}
