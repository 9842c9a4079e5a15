//! Row normalization
//!
//! Maps a raw spreadsheet row into a canonical `TempleRecord`: trims and
//! defaults every string field, classifies the tradition from the source
//! category/type/subtype text, strips phone numbers down to digits, and
//! prefixes bare website hosts with https. All pure; run once per row.

use super::record::{RawRow, RecordStatus, TempleRecord, Tradition};
use super::validate;

/// Build a record from a raw row; `ordinal` becomes the record id
pub fn normalize_row(raw: RawRow, ordinal: u64) -> TempleRecord {
    let name = text(&raw.name);
    let tradition = classify_tradition(
        raw.category.as_deref().unwrap_or(""),
        raw.type_.as_deref().unwrap_or(""),
        raw.subtypes.as_deref().unwrap_or(""),
    );
    let city = text(&raw.city);
    let state = text(&raw.us_state);
    let phone = clean_phone(raw.phone.as_deref().unwrap_or(""));
    let website = clean_website(raw.site.as_deref().unwrap_or(""));
    let email = text(&raw.email_1);
    // full_address preferred, street as fallback
    let address = if raw.full_address.as_deref().is_some_and(|a| !a.trim().is_empty()) {
        text(&raw.full_address)
    } else {
        text(&raw.street)
    };
    let description = text(&raw.description);
    let rating = raw
        .rating
        .as_deref()
        .and_then(|v| v.trim().parse::<f64>().ok());
    let reviews = raw
        .reviews
        .as_deref()
        .and_then(|v| v.trim().parse::<i64>().ok());

    let mut record = TempleRecord {
        id: ordinal,
        raw,
        name,
        tradition,
        city,
        state,
        phone,
        website,
        email,
        address,
        description,
        rating,
        reviews,
        status: RecordStatus::Valid,
    };
    record.status = validate::status_of(&record);
    record
}

fn text(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").trim().to_string()
}

/// Classify the tradition by substring search over the concatenated
/// category/type/subtype text, in fixed precedence order. Hindu is the
/// default when nothing matches.
pub fn classify_tradition(category: &str, type_: &str, subtypes: &str) -> Tradition {
    let full_text = format!("{} {} {}", category, type_, subtypes).to_lowercase();

    if full_text.contains("sikh") || full_text.contains("gurdwara") {
        Tradition::Sikh
    } else if full_text.contains("jain") {
        Tradition::Jain
    } else if full_text.contains("buddhist") || full_text.contains("buddha") {
        Tradition::Buddhist
    } else {
        Tradition::Hindu
    }
}

/// Strip everything that is not a digit
pub fn clean_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Trim, and prefix https:// unless the value already starts with http
pub fn clean_website(site: &str) -> String {
    let url = site.trim();
    if url.is_empty() {
        String::new()
    } else if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::record::RecordStatus;

    fn raw(name: &str, category: &str) -> RawRow {
        RawRow {
            name: Some(name.to_string()),
            category: Some(category.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_tradition_precedence() {
        assert_eq!(classify_tradition("Gurdwara", "", ""), Tradition::Sikh);
        assert_eq!(classify_tradition("", "GURDWARA Sahib", ""), Tradition::Sikh);
        assert_eq!(classify_tradition("Sikh temple", "", ""), Tradition::Sikh);
        assert_eq!(classify_tradition("", "", "Jain center"), Tradition::Jain);
        assert_eq!(classify_tradition("Buddhist temple", "", ""), Tradition::Buddhist);
        assert_eq!(classify_tradition("", "Buddha statue", ""), Tradition::Buddhist);
        // Sikh wins when both appear
        assert_eq!(
            classify_tradition("Sikh and Buddhist center", "", ""),
            Tradition::Sikh
        );
    }

    #[test]
    fn test_classify_tradition_default_hindu() {
        assert_eq!(classify_tradition("Temple", "Mandir", ""), Tradition::Hindu);
        assert_eq!(classify_tradition("", "", ""), Tradition::Hindu);
    }

    #[test]
    fn test_clean_phone_strips_non_digits() {
        assert_eq!(clean_phone("(510) 123-4567"), "5101234567");
        assert_eq!(clean_phone("+1 510.123.4567"), "15101234567");
        assert_eq!(clean_phone(""), "");
    }

    #[test]
    fn test_clean_website_prefixes_https() {
        assert_eq!(clean_website("temple.org"), "https://temple.org");
        assert_eq!(clean_website("http://temple.org"), "http://temple.org");
        assert_eq!(clean_website("https://temple.org"), "https://temple.org");
        assert_eq!(clean_website("  "), "");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let phone = clean_phone("(510) 123-4567");
        assert_eq!(clean_phone(&phone), phone);

        let site = clean_website("temple.org");
        assert_eq!(clean_website(&site), site);
    }

    #[test]
    fn test_normalize_row_trims_and_defaults() {
        let row = RawRow {
            name: Some("  Sri Temple  ".to_string()),
            city: Some("Fremont".to_string()),
            us_state: Some(" CA ".to_string()),
            phone: Some("(510) 123-4567".to_string()),
            site: Some("temple.org".to_string()),
            rating: Some("4.5".to_string()),
            reviews: Some("120".to_string()),
            street: Some("123 Main St".to_string()),
            ..Default::default()
        };
        let record = normalize_row(row, 3);
        assert_eq!(record.id, 3);
        assert_eq!(record.name, "Sri Temple");
        assert_eq!(record.state, "CA");
        assert_eq!(record.phone, "5101234567");
        assert_eq!(record.website, "https://temple.org");
        assert_eq!(record.address, "123 Main St");
        assert_eq!(record.rating, Some(4.5));
        assert_eq!(record.reviews, Some(120));
        assert_eq!(record.status, RecordStatus::Valid);
    }

    #[test]
    fn test_normalize_row_full_address_preferred_over_street() {
        let row = RawRow {
            name: Some("Sri Temple".to_string()),
            full_address: Some("123 Main St, Fremont, CA".to_string()),
            street: Some("123 Main St".to_string()),
            ..Default::default()
        };
        assert_eq!(normalize_row(row, 0).address, "123 Main St, Fremont, CA");
    }

    #[test]
    fn test_normalize_row_bad_numbers_become_none() {
        let row = RawRow {
            rating: Some("n/a".to_string()),
            reviews: Some("many".to_string()),
            ..raw("Sri Temple", "")
        };
        let record = normalize_row(row, 0);
        assert_eq!(record.rating, None);
        assert_eq!(record.reviews, None);
    }

    #[test]
    fn test_normalize_row_keeps_raw_row() {
        let row = raw("  Sri Temple ", "Gurdwara");
        let record = normalize_row(row.clone(), 0);
        assert_eq!(record.raw, row);
        assert_eq!(record.tradition, Tradition::Sikh);
    }
}
