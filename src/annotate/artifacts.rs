//! Artifact extraction: named-entity buckets from the parsed document plus
//! regex extractors (phones, emails, links) and pattern-based date/address
//! extraction over the raw text.
//!
//! The five sources are read-only over their inputs and write disjoint map
//! keys, so the pipeline may run them concurrently and merge by key without
//! conflicts. Empty buckets are dropped from the final map.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::morph::ParsedDoc;

/// Entity-type → set of normalized strings. Ordered containers keep the
/// serialized output deterministic.
pub type ArtifactMap = BTreeMap<String, BTreeSet<String>>;

pub const DATES_KEY: &str = "DATES";
pub const ADDR_KEY: &str = "ADDR";
pub const PHONES_KEY: &str = "PHONES";
pub const EMAILS_KEY: &str = "EMAILS";
pub const LINKS_KEY: &str = "LINKS";

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?\d{1,3}[\s\d\-()]+\d{2,3}[\s\d\-()]+\d{2,3}").expect("valid phone regex")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://[A-Za-z0-9$\-_.+!*'(),%&@/#=?~:]+").expect("valid url regex")
});

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\b\d{1,2}[./]\d{1,2}[./]\d{2,4}\b",
        r"|\b\d{1,2}\s+(?:января|февраля|марта|апреля|мая|июня",
        r"|июля|августа|сентября|октября|ноября|декабря)(?:\s+\d{4})?(?:\s+года)?",
    ))
    .expect("valid date regex")
});

static ADDR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\b(?:г|гор|город|ул|улица|пр|просп|проспект|пер|переулок|пл|площадь|ш|шоссе|наб|набережная)",
        r"\.?\s+[А-ЯЁ][а-яё]+(?:\s+[А-ЯЁ][а-яё]+)?",
        r"(?:\s*,?\s*(?:д|дом)\.?\s*\d+[а-я]?)?",
    ))
    .expect("valid address regex")
});

/// Bucket the document's normalized entity spans by type.
pub fn extract_entities(doc: &ParsedDoc) -> ArtifactMap {
    let mut out = ArtifactMap::new();
    for span in &doc.spans {
        out.entry(span.kind.clone())
            .or_default()
            .insert(span.normal.clone());
    }
    out
}

pub fn extract_phones(text: &str) -> BTreeSet<String> {
    PHONE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

pub fn extract_emails(text: &str) -> BTreeSet<String> {
    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn extract_links(text: &str) -> BTreeSet<String> {
    URL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn extract_dates(text: &str) -> BTreeSet<String> {
    DATE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

pub fn extract_addresses(text: &str) -> BTreeSet<String> {
    ADDR_RE
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Merge the five source outputs into one map, dropping empty buckets.
pub fn merge(
    mut entities: ArtifactMap,
    dates: BTreeSet<String>,
    addresses: BTreeSet<String>,
    phones: BTreeSet<String>,
    emails: BTreeSet<String>,
    links: BTreeSet<String>,
) -> ArtifactMap {
    for (key, bucket) in [
        (DATES_KEY, dates),
        (ADDR_KEY, addresses),
        (PHONES_KEY, phones),
        (EMAILS_KEY, emails),
        (LINKS_KEY, links),
    ] {
        if !bucket.is_empty() {
            entities.insert(key.to_string(), bucket);
        }
    }
    entities.retain(|_, bucket| !bucket.is_empty());
    entities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morph::MorphVocab;

    #[test]
    fn phone_numbers_are_found() {
        let phones = extract_phones("звоните +7 999 123 45 67 завтра");
        assert!(!phones.is_empty());
        assert!(extract_phones("никаких контактов").is_empty());
    }

    #[test]
    fn emails_and_links_are_found() {
        let emails = extract_emails("пишите на user@example.com");
        assert_eq!(emails.len(), 1);
        assert!(emails.contains("user@example.com"));

        let links = extract_links("смотрите https://example.com/path?q=1 и текст");
        assert!(links.iter().any(|l| l.starts_with("https://example.com")));
    }

    #[test]
    fn numeric_and_verbal_dates_are_found() {
        let dates = extract_dates("встреча 12.05.2020, а потом 3 мая 2021 года");
        assert!(dates.iter().any(|d| d == "12.05.2020"));
        assert!(dates.iter().any(|d| d.starts_with("3 мая")));
    }

    #[test]
    fn addresses_are_found() {
        let addrs = extract_addresses("живу по адресу ул. Ленина, д. 5");
        assert!(!addrs.is_empty());
        assert!(extract_addresses("просто текст без адреса").is_empty());
    }

    #[test]
    fn merge_drops_empty_buckets() {
        let doc = MorphVocab::new().parse("обычный текст");
        let map = merge(
            extract_entities(&doc),
            BTreeSet::new(),
            BTreeSet::new(),
            extract_phones("без телефона"),
            BTreeSet::new(),
            BTreeSet::new(),
        );
        assert!(map.is_empty());
    }

    #[test]
    fn entities_bucketed_by_type() {
        let doc = MorphVocab::new().parse("Иван Иванов уехал в Москву");
        let map = extract_entities(&doc);
        assert!(map.get("PER").is_some_and(|b| b.contains("Иван Иванов")));
        assert!(map.get("LOC").is_some_and(|b| b.contains("Москва")));
    }
}
