//! レコードのペイロード変換（バイナリはbase64、テキストはそのまま）

use crate::error::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use docshelf_common::DocumentKind;

pub fn encode(kind: DocumentKind, bytes: &[u8]) -> String {
    if kind.is_binary() {
        STANDARD.encode(bytes)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

pub fn decode(kind: DocumentKind, payload: &str) -> Result<Vec<u8>> {
    if kind.is_binary() {
        Ok(STANDARD.decode(payload.trim())?)
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocShelfError;

    #[test]
    fn test_binary_payload_is_base64() {
        let payload = encode(DocumentKind::Pdf, b"%PDF");
        assert_eq!(payload, "JVBERg==");
        assert_eq!(decode(DocumentKind::Pdf, &payload).unwrap(), b"%PDF");
    }

    #[test]
    fn test_text_payload_is_verbatim() {
        assert_eq!(encode(DocumentKind::PlainText, "こんにちは".as_bytes()), "こんにちは");
        assert_eq!(decode(DocumentKind::PlainText, "JVBERg==").unwrap(), b"JVBERg==");
    }

    #[test]
    fn test_invalid_base64() {
        let err = decode(DocumentKind::WordProcessor, "not base64!!").unwrap_err();
        assert!(matches!(err, DocShelfError::Base64(_)));
    }
}
