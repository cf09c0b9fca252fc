use lazyprep::{Connection, Session};

pub async fn unprepare<C: Connection>(session: &mut Session<C>) {
    session
        .prepare("touch_user", "UPDATE users SET seen = now() WHERE id = $1")
        .expect("Failed to define touch_user");
    session
        .prepare_now("touch_user")
        .await
        .expect("Failed to prepare touch_user");
    assert!(session.registry().is_registered("touch_user"));
    assert!(session.connection().is_prepared("touch_user"));

    session
        .unprepare("touch_user")
        .await
        .expect("Failed to unprepare touch_user");
    assert!(!session.exists("touch_user"));
    assert!(!session.connection().is_prepared("touch_user"));

    // The name is free again, even for another query
    session
        .prepare("touch_user", "UPDATE users SET seen = NULL WHERE id = $1")
        .expect("Failed to define touch_user again");
    session
        .invoke("touch_user")
        .append(3)
        .expect("Failed to append")
        .execute()
        .await
        .expect("Failed to execute touch_user");
    session
        .unprepare("touch_user")
        .await
        .expect("Failed to unprepare touch_user again");
}
