/// Data-URL markers browser clients prepend to canvas exports. The strip is
/// textual and order-fixed; anything else passes through untouched.
const DATA_URL_PREFIXES: [&str; 3] = [
  "data:image/png;base64,",
  "data:image/jpeg;base64,",
  "data:image/jpg;base64,",
];

/// Remove the first occurrence of each known data-URL prefix, leaving the
/// bare base64 payload. Never decodes or validates the payload itself.
pub fn normalize_base64(image: &str) -> String {
  let mut payload = image.to_string();
  for prefix in DATA_URL_PREFIXES {
    payload = payload.replacen(prefix, "", 1);
  }
  payload
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_png_prefix() {
    assert_eq!(normalize_base64("data:image/png;base64,QQ=="), "QQ==");
  }

  #[test]
  fn strips_jpeg_prefix() {
    assert_eq!(normalize_base64("data:image/jpeg;base64,QQ=="), "QQ==");
  }

  #[test]
  fn strips_jpg_prefix() {
    assert_eq!(normalize_base64("data:image/jpg;base64,QQ=="), "QQ==");
  }

  #[test]
  fn bare_payload_passes_through() {
    assert_eq!(normalize_base64("QQ=="), "QQ==");
  }

  #[test]
  fn malformed_prefix_passes_through() {
    assert_eq!(
      normalize_base64("data:image/gif;base64,QQ=="),
      "data:image/gif;base64,QQ=="
    );
  }

  #[test]
  fn strips_only_first_occurrence_per_prefix() {
    let input = "data:image/png;base64,AAAdata:image/png;base64,BBB";
    assert_eq!(normalize_base64(input), "AAAdata:image/png;base64,BBB");
  }

  #[test]
  fn stacked_prefixes_are_each_removed_once() {
    let input = "data:image/png;base64,data:image/jpeg;base64,QQ==";
    assert_eq!(normalize_base64(input), "QQ==");
  }
}
