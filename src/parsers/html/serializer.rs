use html5ever::serialize::{serialize, SerializeOpts};
use markup5ever_rcdom::{RcDom, SerializableHandle};

use crate::core::RelayError;

/// 序列化文档
///
/// 输出始终为 UTF-8 文本。
pub fn serialize_document(dom: RcDom) -> Result<String, RelayError> {
    let mut buf: Vec<u8> = Vec::new();

    let serializable: SerializableHandle = dom.document.into();
    serialize(&mut buf, &serializable, SerializeOpts::default())
        .map_err(|e| RelayError::Internal(format!("Unable to serialize DOM: {}", e)))?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}
