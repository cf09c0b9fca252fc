use lazyprep::{Binary, Connection, Session, WireValue};

pub async fn binary<C: Connection>(session: &mut Session<C>) {
    session
        .prepare("store_blob", "INSERT INTO blobs (id, data) VALUES ($1, $2)")
        .expect("Failed to define store_blob");
    let data = vec![0xde, 0x00, 0xad, 0x00, 0x00, 0xbe, 0xef];
    let mut invocation = session.invoke("store_blob");
    invocation
        .append(1_i64)
        .expect("Failed to append the id")
        .append(Binary::from(data.clone()))
        .expect("Failed to append the data");
    let params = invocation.params();
    assert!(params.has_binary());
    assert_eq!(params.formats(), [0, 1]);
    assert_eq!(params.lengths(), [1, 7]);
    assert_eq!(params[1], WireValue::Binary(data.into()));
    invocation
        .execute()
        .await
        .expect("Failed to execute store_blob");
}
