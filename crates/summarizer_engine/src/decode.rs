use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding_label: String,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("не удалось декодировать файл как {encoding}")]
    DecodeFailure { encoding: String },
}

/// Decode raw file bytes into UTF-8 using: BOM -> strict UTF-8 -> chardetng fallback.
///
/// Spreadsheet exports are frequently windows-1251 or UTF-16 with a BOM.
pub fn decode_text(bytes: &[u8]) -> Result<DecodedText, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(DecodedText {
            text: text.to_string(),
            encoding_label: UTF_8.name().to_string(),
        });
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedText, DecodeError> {
    // `decode` strips a matching BOM.
    let (text, used, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: used.name().to_string(),
        });
    }
    Ok(DecodedText {
        text: text.into_owned(),
        encoding_label: used.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_bom_is_stripped() {
        let decoded = decode_text(b"\xEF\xBB\xBFID,text\n").unwrap();
        assert_eq!(decoded.text, "ID,text\n");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn windows_1251_is_detected() {
        let review = "Отличный телефон, быстрая доставка и хорошая цена. \
                      Батарея держит два дня, экран яркий, камера снимает неплохо.";
        let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode(review);
        let decoded = decode_text(&bytes).unwrap();
        assert_eq!(decoded.encoding_label, "windows-1251");
        assert_eq!(decoded.text, review);
    }
}
