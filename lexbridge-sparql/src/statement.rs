//! Update text for the bulk-load and graph-drop operations.

/// Source URL for a `LOAD`: the file itself, or its S3 object URL when a
/// bucket is named. An empty bucket name counts as no bucket.
pub fn load_source(file_location: &str, bucket: Option<&str>) -> String {
    match bucket.filter(|b| !b.is_empty()) {
        Some(bucket) => format!("https://{bucket}.s3.amazonaws.com/{file_location}"),
        None => file_location.to_string(),
    }
}

/// `LOAD <source> INTO GRAPH <graph>`
///
/// `file_location` is not checked for being a well-formed URL.
pub fn load_statement(file_location: &str, graph_uri: &str, bucket: Option<&str>) -> String {
    format!(
        "LOAD <{}> INTO GRAPH <{graph_uri}>",
        load_source(file_location, bucket)
    )
}

/// `DROP GRAPH <graph>`
pub fn drop_statement(graph_uri: &str) -> String {
    format!("DROP GRAPH <{graph_uri}>")
}
