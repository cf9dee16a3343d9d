/*
    Laurel - certificate template design engine
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifiers the substitution engine resolves. Anything else inside
/// `{{...}}` is left untouched.
pub const BUILTIN_IDENTIFIERS: [&str; 6] = [
    "recipient_name",
    "quiz_title",
    "score",
    "completion_date",
    "issuer_name",
    "issuer_title",
];

/// The preview data feed supplied by the surrounding product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CertificateData {
    pub recipient_name: String,
    pub quiz_title: String,
    pub score: f32,
    pub completion_date: NaiveDate,
    pub issuer_name: String,
    pub issuer_title: String,
}

impl CertificateData {
    /// Placeholder feed for ad-hoc preview testing.
    pub fn sample() -> Self {
        Self {
            recipient_name: "Jane Doe".to_string(),
            quiz_title: "Safety Fundamentals".to_string(),
            score: 87.0,
            completion_date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            issuer_name: "Alex Rivera".to_string(),
            issuer_title: "Training Lead".to_string(),
        }
    }

    fn value_of(&self, identifier: &str, locale: DateLocale) -> Option<String> {
        match identifier {
            "recipient_name" => Some(self.recipient_name.clone()),
            "quiz_title" => Some(self.quiz_title.clone()),
            "score" => Some(format_score(self.score)),
            "completion_date" => Some(locale.format_date(self.completion_date)),
            "issuer_name" => Some(self.issuer_name.clone()),
            "issuer_title" => Some(self.issuer_title.clone()),
            _ => None,
        }
    }
}

/// Display form of a score: integer percent text.
pub fn format_score(score: f32) -> String {
    format!("{}%", score.round() as i64)
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateLocale {
    #[default]
    EnUs,
    JaJp,
}

impl DateLocale {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "en-US" => Some(DateLocale::EnUs),
            "ja-JP" => Some(DateLocale::JaJp),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            DateLocale::EnUs => "en-US",
            DateLocale::JaJp => "ja-JP",
        }
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        match self {
            DateLocale::EnUs => date.format("%B %-d, %Y").to_string(),
            DateLocale::JaJp => date.format("%Y年%-m月%-d日").to_string(),
        }
    }
}

/// Replaces every `{{identifier}}` occurrence for each built-in identifier.
/// Unknown tokens stay literal; the operation is pure and idempotent because
/// the delimiters are consumed and never reintroduced.
pub fn substitute(input: &str, data: &CertificateData, locale: DateLocale) -> String {
    if !input.contains("{{") {
        return input.to_string();
    }
    let mut result = input.to_string();
    for identifier in BUILTIN_IDENTIFIERS {
        let token = format!("{{{{{identifier}}}}}");
        if result.contains(&token) {
            if let Some(value) = data.value_of(identifier, locale) {
                result = result.replace(&token, &value);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_recipient_name() {
        let data = CertificateData::sample();
        let out = substitute("Hello {{recipient_name}}", &data, DateLocale::EnUs);
        assert_eq!(out, "Hello Jane Doe");
    }

    #[test]
    fn string_without_tokens_is_unchanged() {
        let data = CertificateData::sample();
        let out = substitute("Certificate of Completion", &data, DateLocale::EnUs);
        assert_eq!(out, "Certificate of Completion");
    }

    #[test]
    fn unknown_token_stays_literal() {
        let data = CertificateData::sample();
        let out = substitute("Issued by {{foo}}", &data, DateLocale::EnUs);
        assert_eq!(out, "Issued by {{foo}}");
    }

    #[test]
    fn replaces_every_occurrence() {
        let data = CertificateData::sample();
        let out = substitute(
            "{{recipient_name}} / {{recipient_name}}",
            &data,
            DateLocale::EnUs,
        );
        assert_eq!(out, "Jane Doe / Jane Doe");
    }

    #[test]
    fn score_renders_as_integer_percent() {
        let mut data = CertificateData::sample();
        data.score = 92.4;
        assert_eq!(substitute("{{score}}", &data, DateLocale::EnUs), "92%");
        data.score = 92.5;
        assert_eq!(substitute("{{score}}", &data, DateLocale::EnUs), "93%");
    }

    #[test]
    fn completion_date_follows_locale() {
        let data = CertificateData::sample();
        assert_eq!(
            substitute("{{completion_date}}", &data, DateLocale::EnUs),
            "March 5, 2026"
        );
        assert_eq!(
            substitute("{{completion_date}}", &data, DateLocale::JaJp),
            "2026年3月5日"
        );
    }

    #[test]
    fn substitution_is_idempotent() {
        let data = CertificateData::sample();
        let once = substitute("Awarded to {{recipient_name}} ({{score}})", &data, DateLocale::EnUs);
        let twice = substitute(&once, &data, DateLocale::EnUs);
        assert_eq!(once, twice);
    }

    #[test]
    fn mixed_known_and_unknown_tokens() {
        let data = CertificateData::sample();
        let out = substitute(
            "{{quiz_title}} / {{grade}} / {{issuer_title}}",
            &data,
            DateLocale::EnUs,
        );
        assert_eq!(out, "Safety Fundamentals / {{grade}} / Training Lead");
    }
}
