use crate::silent_logs;
use lazyprep::{Connection, Session, StatementError, statement_error};

pub async fn unknown<C: Connection>(session: &mut Session<C>) {
    let mut invocation = session.invoke("never_defined");
    assert!(!invocation.exists());
    invocation.append(1).expect("Failed to append");
    silent_logs! {
        let error = invocation
            .execute()
            .await
            .expect_err("Executing an undefined statement must fail");
        assert!(
            matches!(
                statement_error(&error),
                Some(StatementError::UnknownStatement { name }) if name == "never_defined"
            ),
            "Unexpected error: {error:#}"
        );
    }
    assert!(!session.exists("never_defined"));
}

pub async fn duplicate<C: Connection>(session: &mut Session<C>) {
    session
        .prepare("count_users", "SELECT COUNT(*) FROM users")
        .expect("Failed to define count_users");
    silent_logs! {
        let error = session
            .prepare("count_users", "SELECT COUNT(*) FROM users WHERE active")
            .expect_err("Redefining a statement with another query must fail");
        assert!(
            matches!(
                statement_error(&error),
                Some(StatementError::DuplicateStatement { name }) if name == "count_users"
            ),
            "Unexpected error: {error:#}"
        );
    }
    assert_eq!(
        session.registry().get("count_users").map(|v| v.sql()),
        Some("SELECT COUNT(*) FROM users")
    );
    session
        .invoke("count_users")
        .execute()
        .await
        .expect("The first definition must still work");
}

pub async fn prepare_failure<C: Connection>(session: &mut Session<C>) {
    session
        .prepare("misspelled", "SELEC name FROM users WHERE id = $1")
        .expect("Defining a statement never checks its query");
    for _ in 0..2 {
        silent_logs! {
            let error = session
                .invoke("misspelled")
                .append(7)
                .expect("Failed to append")
                .execute()
                .await
                .expect_err("The server must refuse a misspelled query");
            assert!(
                matches!(
                    statement_error(&error),
                    Some(StatementError::PrepareFailed { name, .. }) if name == "misspelled"
                ),
                "Unexpected error: {error:#}"
            );
        }
        assert!(!session.registry().is_registered("misspelled"));
    }
    assert!(session.exists("misspelled"));
}
