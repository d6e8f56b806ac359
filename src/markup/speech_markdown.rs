//! Basic Speech Markdown translator.
//!
//! Covers the commonly used subset: breaks, emphasis shorthand, and
//! `(text)[modifier]` sections. Anything else is emitted as escaped text.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::{MarkupTranslator, Platform};
use crate::error::TtsError;

const BREAK_STRENGTHS: [&str; 6] = ["none", "x-weak", "weak", "medium", "strong", "x-strong"];
const EMPHASIS_LEVELS: [&str; 4] = ["strong", "moderate", "none", "reduced"];

static MODIFIER_RE: OnceLock<Regex> = OnceLock::new();
static TIME_BREAK_RE: OnceLock<Regex> = OnceLock::new();
static NAMED_BREAK_RE: OnceLock<Regex> = OnceLock::new();
static TIME_RE: OnceLock<Regex> = OnceLock::new();
static SHORTHAND_RES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

fn modifier_re() -> &'static Regex {
    MODIFIER_RE.get_or_init(|| {
        Regex::new(r"\(([^()\[\]]+)\)\[([^\[\]]+)\]").expect("modifier pattern is valid")
    })
}

fn time_break_re() -> &'static Regex {
    TIME_BREAK_RE
        .get_or_init(|| Regex::new(r"\[(\d+(?:\.\d+)?)(ms|s)\]").expect("break pattern is valid"))
}

fn named_break_re() -> &'static Regex {
    NAMED_BREAK_RE.get_or_init(|| {
        Regex::new(r#"\[break:\s*["']([^"']*)["']\]"#).expect("break pattern is valid")
    })
}

fn time_re() -> &'static Regex {
    TIME_RE.get_or_init(|| Regex::new(r"^\d+(?:\.\d+)?(?:ms|s)$").expect("time pattern is valid"))
}

fn shorthand_res() -> &'static [(Regex, &'static str)] {
    SHORTHAND_RES.get_or_init(|| {
        let bounded = |marker: &str| {
            let m = regex::escape(marker);
            Regex::new(&format!(
                r"(^|[\s(>]){m}([^\s+~-](?:[^+~\n]*?[^\s+~-])?){m}($|[\s.,!?;:)<])"
            ))
            .expect("emphasis pattern is valid")
        };
        vec![
            (bounded("++"), "strong"),
            (bounded("+"), "moderate"),
            (bounded("~"), "none"),
            (bounded("-"), "reduced"),
        ]
    })
}

/// Speech Markdown translator for a given platform profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeechMarkdown {
    platform: Platform,
}

impl SpeechMarkdown {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    fn translate_modifiers(&self, text: &str) -> String {
        modifier_re()
            .replace_all(text, |caps: &Captures<'_>| {
                apply_modifiers(self.platform, &caps[1], &caps[2])
            })
            .into_owned()
    }
}

impl MarkupTranslator for SpeechMarkdown {
    fn to_ssml(&self, markdown: &str) -> Result<String, TtsError> {
        let escaped = escape_xml(markdown.trim());
        let with_modifiers = self.translate_modifiers(&escaped);
        let with_breaks = translate_breaks(&with_modifiers)?;
        let body = translate_shorthand(&with_breaks);
        Ok(format!("<speak>{body}</speak>"))
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Quote-escape a modifier value for a double-quoted attribute. The
/// source is already XML-escaped, so only `"` remains.
fn escape_attr(value: &str) -> String {
    value.replace('"', "&quot;")
}

fn translate_breaks(text: &str) -> Result<String, TtsError> {
    let timed = time_break_re().replace_all(text, r#"<break time="$1$2"/>"#);

    let mut failure = None;
    let named = named_break_re().replace_all(&timed, |caps: &Captures<'_>| {
        let value = caps[1].trim();
        if time_re().is_match(value) {
            format!(r#"<break time="{value}"/>"#)
        } else if BREAK_STRENGTHS.contains(&value) {
            format!(r#"<break strength="{value}"/>"#)
        } else {
            if failure.is_none() {
                failure = Some(format!("unknown break value '{value}'"));
            }
            String::new()
        }
    });

    match failure {
        Some(message) => Err(TtsError::Markup(message)),
        None => Ok(named.into_owned()),
    }
}

fn translate_shorthand(text: &str) -> String {
    let mut current = text.to_string();
    for (re, level) in shorthand_res() {
        let replacement = format!(r#"${{1}}<emphasis level="{level}">${{2}}</emphasis>${{3}}"#);
        // Adjacent sections share a delimiter, so repeat until nothing changes.
        loop {
            let next = re.replace_all(&current, replacement.as_str()).into_owned();
            if next == current {
                break;
            }
            current = next;
        }
    }
    current
}

/// Split a modifier list on `;`, ignoring separators inside quoted values.
fn split_modifiers(list: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut quote = None;
    let mut start = 0;
    for (i, ch) in list.char_indices() {
        match (quote, ch) {
            (None, '"' | '\'') => quote = Some(ch),
            (Some(open), _) if ch == open => quote = None,
            (None, ';') => {
                items.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&list[start..]);
    items
}

fn parse_modifiers(list: &str) -> Vec<(String, Option<String>)> {
    split_modifiers(list)
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| match item.split_once(':') {
            Some((key, value)) => {
                let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                (key.trim().to_ascii_lowercase(), Some(value.to_string()))
            }
            None => (item.to_ascii_lowercase(), None),
        })
        .collect()
}

fn say_as_kind(key: &str) -> Option<&'static str> {
    match key {
        "characters" | "chars" => Some("characters"),
        "number" => Some("cardinal"),
        "ordinal" => Some("ordinal"),
        "digits" => Some("digits"),
        "fraction" => Some("fraction"),
        "unit" => Some("unit"),
        "telephone" => Some("telephone"),
        "address" => Some("address"),
        "expletive" | "bleep" => Some("expletive"),
        "date" => Some("date"),
        "time" => Some("time"),
        _ => None,
    }
}

fn apply_modifiers(platform: Platform, text: &str, list: &str) -> String {
    let mut inner = text.to_string();
    let mut prosody: Vec<String> = Vec::new();
    let mut emphasis = None;
    let mut lang = None;
    let mut whisper = false;

    for (key, value) in parse_modifiers(list) {
        let value = value.as_deref().map(escape_attr);
        match (key.as_str(), value) {
            ("emphasis", Some(level)) if EMPHASIS_LEVELS.contains(&level.as_str()) => {
                emphasis = Some(level);
            }
            ("rate" | "pitch" | "volume", Some(value)) => {
                prosody.push(format!(r#"{key}="{value}""#));
            }
            ("whisper", _) => whisper = true,
            ("ipa", Some(ph)) => {
                inner = format!(r#"<phoneme alphabet="ipa" ph="{ph}">{inner}</phoneme>"#);
            }
            ("sub", Some(alias)) => {
                inner = format!(r#"<sub alias="{alias}">{inner}</sub>"#);
            }
            ("lang", Some(code)) => lang = Some(code),
            ("interpret-as", Some(kind)) => {
                inner = format!(r#"<say-as interpret-as="{kind}">{inner}</say-as>"#);
            }
            (other, value) => {
                if let Some(kind) = say_as_kind(other) {
                    inner = match value {
                        Some(format) if kind == "date" || kind == "time" => format!(
                            r#"<say-as interpret-as="{kind}" format="{format}">{inner}</say-as>"#
                        ),
                        _ => format!(r#"<say-as interpret-as="{kind}">{inner}</say-as>"#),
                    };
                } else {
                    tracing::debug!(modifier = other, "Ignoring unsupported Speech Markdown modifier");
                }
            }
        }
    }

    if !prosody.is_empty() {
        inner = format!("<prosody {}>{inner}</prosody>", prosody.join(" "));
    }
    if let Some(level) = emphasis {
        inner = format!(r#"<emphasis level="{level}">{inner}</emphasis>"#);
    }
    if whisper {
        inner = match platform {
            Platform::AmazonAlexa => {
                format!(r#"<amazon:effect name="whispered">{inner}</amazon:effect>"#)
            }
            Platform::GoogleAssistant | Platform::Generic => {
                format!(r#"<prosody volume="x-soft" rate="slow">{inner}</prosody>"#)
            }
        };
    }
    if let Some(code) = lang {
        inner = format!(r#"<lang xml:lang="{code}">{inner}</lang>"#);
    }
    inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn google(markdown: &str) -> String {
        SpeechMarkdown::new(Platform::GoogleAssistant)
            .to_ssml(markdown)
            .unwrap()
    }

    #[test]
    fn plain_text_is_wrapped_and_escaped() {
        assert_eq!(
            google("Fish & Chips <today>\n"),
            "<speak>Fish &amp; Chips &lt;today&gt;</speak>"
        );
    }

    #[test]
    fn timed_and_named_breaks() {
        assert_eq!(
            google("Hello [500ms] world [2s] again [break:\"strong\"] end [break:'1.5s']"),
            "<speak>Hello <break time=\"500ms\"/> world <break time=\"2s\"/> again \
             <break strength=\"strong\"/> end <break time=\"1.5s\"/></speak>"
        );
    }

    #[test]
    fn unknown_break_value_is_an_error() {
        let err = SpeechMarkdown::default()
            .to_ssml("wait [break:\"forever\"]")
            .unwrap_err();
        assert!(matches!(err, TtsError::Markup(m) if m.contains("forever")));
    }

    #[test]
    fn emphasis_shorthand() {
        assert_eq!(
            google("This is ++very++ +quite+ ~flat~ and -quiet- stuff."),
            "<speak>This is <emphasis level=\"strong\">very</emphasis> \
             <emphasis level=\"moderate\">quite</emphasis> \
             <emphasis level=\"none\">flat</emphasis> and \
             <emphasis level=\"reduced\">quiet</emphasis> stuff.</speak>"
        );
    }

    #[test]
    fn hyphenated_words_are_not_emphasis() {
        assert_eq!(
            google("A well-known text-based format"),
            "<speak>A well-known text-based format</speak>"
        );
    }

    #[test]
    fn modifiers_map_to_ssml_tags() {
        assert_eq!(
            google("(Guten Tag)[lang:\"de-DE\"] (SQL)[characters] (W3C)[sub:\"World Wide Web Consortium\"]"),
            "<speak><lang xml:lang=\"de-DE\">Guten Tag</lang> \
             <say-as interpret-as=\"characters\">SQL</say-as> \
             <sub alias=\"World Wide Web Consortium\">W3C</sub></speak>"
        );
    }

    #[test]
    fn prosody_modifiers_are_combined() {
        assert_eq!(
            google("(slowly now)[rate:\"slow\";pitch:\"low\"]"),
            "<speak><prosody rate=\"slow\" pitch=\"low\">slowly now</prosody></speak>"
        );
    }

    #[test]
    fn date_modifier_carries_format() {
        assert_eq!(
            google("(10-19-2016)[date:\"mdy\"]"),
            "<speak><say-as interpret-as=\"date\" format=\"mdy\">10-19-2016</say-as></speak>"
        );
    }

    #[test]
    fn whisper_depends_on_platform() {
        assert_eq!(
            google("(secret)[whisper]"),
            "<speak><prosody volume=\"x-soft\" rate=\"slow\">secret</prosody></speak>"
        );
        assert_eq!(
            SpeechMarkdown::new(Platform::AmazonAlexa)
                .to_ssml("(secret)[whisper]")
                .unwrap(),
            "<speak><amazon:effect name=\"whispered\">secret</amazon:effect></speak>"
        );
    }

    #[test]
    fn quotes_in_modifier_values_are_escaped() {
        assert_eq!(
            google("(NYC)[sub:'the \"big\" apple'] (R&D)[sub:\"research & development\"]"),
            "<speak><sub alias=\"the &quot;big&quot; apple\">NYC</sub> \
             <sub alias=\"research &amp; development\">R&amp;D</sub></speak>"
        );
    }

    #[test]
    fn unsupported_modifier_keeps_text() {
        assert_eq!(google("(hello)[voice:\"Brian\"]"), "<speak>hello</speak>");
    }

    #[test]
    fn platform_parses_from_kebab_case() {
        assert_eq!("amazon-alexa".parse::<Platform>().unwrap(), Platform::AmazonAlexa);
        assert_eq!(Platform::default().to_string(), "google-assistant");
    }
}
