use super::*;

#[test]
fn flushes_final_short_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = CsvChunkWriter::new(
        "public",
        "orders",
        dir.path(),
        vec!["id".to_string(), "name".to_string()],
        vec!["int4".to_string(), "text".to_string()],
        100,
    );

    writer
        .write_row(&[Some("1".to_string()), Some("alice".to_string())])
        .unwrap();
    writer.flush().unwrap();

    assert_eq!(writer.files.len(), 1);
    assert!(writer.files[0]
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("public_orders_chunk_0001"));
}

#[test]
fn rolls_to_new_chunk_at_chunk_size() {
    let dir = tempfile::tempdir().unwrap();
    let mut writer = CsvChunkWriter::new(
        "public",
        "orders",
        dir.path(),
        vec!["id".to_string()],
        vec!["int4".to_string()],
        2,
    );

    for i in 0..5 {
        writer.write_row(&[Some(i.to_string())]).unwrap();
    }
    writer.flush().unwrap();

    assert_eq!(writer.files.len(), 3);
}
