use image::{GrayImage, Luma};
use qrcode::{EcLevel, QrCode};

use crate::models::ticket::TicketRecord;
use crate::ticketing::TicketError;

/// Encodes the full ticket record (not just the ID) as a QR image, so a
/// scan recovers every field without a server lookup. High error correction
/// keeps the code scannable on a creased printout.
pub fn encode(record: &TicketRecord, size: u32) -> Result<GrayImage, TicketError> {
    let payload =
        serde_json::to_string(record).map_err(|e| TicketError::Encoding(e.to_string()))?;

    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::H)
        .map_err(|e| TicketError::Encoding(e.to_string()))?;

    Ok(code.render::<Luma<u8>>().max_dimensions(size, size).build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category::{Gender, TicketCategory};
    use crate::pricing::PriceTable;
    use chrono::Utc;

    fn sample_record() -> TicketRecord {
        TicketRecord::issue(
            "Jonas Frei".to_string(),
            9,
            Gender::Male,
            TicketCategory::Child,
            Utc::now().date_naive(),
            &PriceTable::default(),
        )
    }

    #[test]
    fn test_encode_produces_an_image() {
        let image = encode(&sample_record(), 256).unwrap();
        assert!(image.width() > 0);
        assert!(image.width() <= 256);
        assert_eq!(image.width(), image.height());
    }

    #[test]
    fn test_encoded_image_has_dark_and_light_modules() {
        let image = encode(&sample_record(), 200).unwrap();
        let mut dark = false;
        let mut light = false;
        for pixel in image.pixels() {
            if pixel[0] < 128 {
                dark = true;
            } else {
                light = true;
            }
        }
        assert!(dark && light);
    }
}
