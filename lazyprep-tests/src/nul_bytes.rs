use lazyprep::{Connection, Session, WireValue};

pub async fn nul_bytes<C: Connection>(session: &mut Session<C>) {
    session
        .prepare("echo_text", "SELECT $1::text, $2::text, $3::text")
        .expect("Failed to define echo_text");
    let mut invocation = session.invoke("echo_text");
    invocation
        .append("ab\0cd")
        .expect("Failed to append the first value")
        .append(String::from("\0everything dropped"))
        .expect("Failed to append the second value")
        .append("no zero here")
        .expect("Failed to append the third value");
    assert_eq!(
        invocation.params().as_slice(),
        &[
            WireValue::Text("ab".into()),
            WireValue::Text("".into()),
            WireValue::Text("no zero here".into()),
        ]
    );
    invocation
        .execute()
        .await
        .expect("Failed to execute echo_text");
}
