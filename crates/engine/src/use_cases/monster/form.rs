//! Field parsing for the monster authoring form.
//!
//! Decoding the urlencoded payload is strict: a malformed percent escape or a
//! `;` separator rejects the whole submission. Once decoded, every field is
//! optional and nothing can fail: missing keys become empty strings or zero,
//! and numbers that do not parse become zero with a warning in the log.

use std::collections::HashMap;

use thiserror::Error;

use bestiary_domain::{Action, ArmorClass, HitPoints, Monster, Save, Skill, Speed, Trait};

/// Key/value bag decoded from an urlencoded form body.
///
/// When a key is submitted more than once only its first value is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    values: HashMap<String, String>,
}

impl FormFields {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut values = HashMap::new();
        for (key, value) in pairs {
            values.entry(key.into()).or_insert_with(|| value.into());
        }
        Self { values }
    }

    /// Value submitted under `key`, or `""` when absent.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or_default()
    }

    fn text(&self, key: &str) -> String {
        self.get(key).to_string()
    }

    fn single(&self, key: &str) -> Vec<String> {
        vec![self.text(key)]
    }

    fn int(&self, key: &str) -> i64 {
        parse_int(self.get(key))
    }
}

/// Malformed `application/x-www-form-urlencoded` input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormDecodeError {
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),
    #[error("invalid semicolon separator in query")]
    SemicolonSeparator,
}

/// Decode an urlencoded payload into ordered key/value pairs.
///
/// Pairs are split on `&` and empty segments are skipped. `+` decodes to a
/// space and every `%` must be followed by two hex digits. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn decode_urlencoded(input: &[u8]) -> Result<Vec<(String, String)>, FormDecodeError> {
    let mut pairs = Vec::new();
    for segment in input.split(|&b| b == b'&') {
        if segment.contains(&b';') {
            return Err(FormDecodeError::SemicolonSeparator);
        }
        if segment.is_empty() {
            continue;
        }
        let (key, value) = match segment.iter().position(|&b| b == b'=') {
            Some(eq) => (&segment[..eq], &segment[eq + 1..]),
            None => (segment, &segment[segment.len()..]),
        };
        pairs.push((unescape(key)?, unescape(value)?));
    }
    Ok(pairs)
}

fn unescape(input: &[u8]) -> Result<String, FormDecodeError> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            b'%' => {
                let escape = input.get(i + 1..i + 3);
                match escape.and_then(|hex| Some((hex_value(hex[0])?, hex_value(hex[1])?))) {
                    Some((hi, lo)) => out.push((hi << 4) | lo),
                    None => {
                        let end = (i + 3).min(input.len());
                        let shown = String::from_utf8_lossy(&input[i..end]).into_owned();
                        return Err(FormDecodeError::InvalidEscape(shown));
                    }
                }
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Parse a decimal integer, falling back to 0.
///
/// A failed conversion is logged once at WARN and never reported to the caller.
pub fn parse_int(s: &str) -> i64 {
    tracing::trace!(input = %s, "Parsing integer field");
    match s.parse::<i64>() {
        Ok(value) => {
            tracing::trace!(value, "Converted integer");
            value
        }
        Err(e) => {
            tracing::warn!(input = %s, error = %e, "Conversion error, using 0");
            0
        }
    }
}

/// Build a monster from the authoring form.
///
/// Only `type` is normalized (lower-cased). Each list field holds exactly the
/// one value found under its key.
pub fn parse_monster(form: &FormFields) -> Monster {
    Monster {
        name: form.text("name"),
        source: form.text("source"),
        size: form.single("size"),
        creature_type: form.get("type").to_lowercase(),
        alignment: form.single("alignment"),
        ac: vec![ArmorClass {
            ac: form.int("ac"),
            from: form.single("acFrom"),
        }],
        hp: HitPoints {
            average: form.int("hpAverage"),
            formula: form.text("hpFormula"),
        },
        speed: Speed {
            walk: form.int("walk"),
            burrow: form.int("burrow"),
            climb: form.int("climb"),
            fly: form.int("fly"),
            swim: form.int("swim"),
        },
        str: form.int("str"),
        dex: form.int("dex"),
        con: form.int("con"),
        int: form.int("int"),
        wis: form.int("wis"),
        cha: form.int("cha"),
        save: Save {
            str: form.text("saveStr"),
            dex: form.text("saveDex"),
            con: form.text("saveCon"),
            int: form.text("saveInt"),
            wis: form.text("saveWis"),
            cha: form.text("saveCha"),
        },
        skill: Skill {
            acrobatics: form.text("acrobatics"),
            animal_handling: form.text("animalHandling"),
            arcana: form.text("arcana"),
            athletics: form.text("athletics"),
            deception: form.text("deception"),
            history: form.text("history"),
            insight: form.text("insight"),
            intimidation: form.text("intimidation"),
            investigation: form.text("investigation"),
            medicine: form.text("medicine"),
            nature: form.text("nature"),
            perception: form.text("perception"),
            performance: form.text("performance"),
            persuasion: form.text("persuasion"),
            religion: form.text("religion"),
            sleight_of_hand: form.text("sleightOfHand"),
            stealth: form.text("stealth"),
            survival: form.text("survival"),
        },
        resist: form.single("resist"),
        condition_immune: form.single("conditionImmune"),
        immune: form.single("immune"),
        vulnerable: form.single("vulnerable"),
        senses: form.single("senses"),
        languages: form.single("languages"),
        cr: form.text("cr"),
        traits: vec![Trait {
            name: form.text("traitName"),
            entries: form.single("traitEntry"),
        }],
        actions: vec![Action {
            name: form.text("actionName"),
            entries: form.single("actionEntry"),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Counts WARN events seen while it is the default subscriber.
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn count_warnings<T>(f: impl FnOnce() -> T) -> (T, usize) {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(count.clone()));
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, count.load(Ordering::SeqCst))
    }

    fn form(pairs: &[(&str, &str)]) -> FormFields {
        FormFields::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn parse_int_accepts_signed_integers() {
        assert_eq!(parse_int("15"), 15);
        assert_eq!(parse_int("-2"), -2);
        assert_eq!(parse_int("+4"), 4);
    }

    #[test]
    fn parse_int_failures_become_zero_with_one_warning_each() {
        for input in ["", "abc", "12.5", " 7", "99999999999999999999"] {
            let (value, warnings) = count_warnings(|| parse_int(input));
            assert_eq!(value, 0, "input {input:?}");
            assert_eq!(warnings, 1, "input {input:?}");
        }
    }

    #[test]
    fn parse_int_keeps_values_beyond_32_bits() {
        let (values, warnings) = count_warnings(|| {
            [parse_int("3000000000"), parse_int("99999999999"), parse_int("-3000000000")]
        });
        assert_eq!(values, [3_000_000_000, 99_999_999_999, -3_000_000_000]);
        assert_eq!(warnings, 0);
    }

    #[test]
    fn parse_int_success_does_not_warn() {
        let (value, warnings) = count_warnings(|| parse_int("30"));
        assert_eq!(value, 30);
        assert_eq!(warnings, 0);
    }

    #[test]
    fn goblin_submission_fills_named_fields_and_zeroes_the_rest() {
        let monster = parse_monster(&form(&[
            ("name", "Goblin"),
            ("ac", "15"),
            ("hpAverage", "7"),
            ("str", "8"),
            ("walk", "30"),
        ]));

        assert_eq!(monster.name, "Goblin");
        assert_eq!(
            monster.ac,
            vec![ArmorClass {
                ac: 15,
                from: vec![String::new()],
            }]
        );
        assert_eq!(monster.hp.average, 7);
        assert_eq!(monster.hp.formula, "");
        assert_eq!(monster.str, 8);
        assert_eq!(monster.speed.walk, 30);
        assert_eq!(monster.speed.fly, 0);
        assert_eq!((monster.dex, monster.con, monster.int), (0, 0, 0));
        assert_eq!(monster.save, Save::default());
        assert_eq!(monster.skill, Skill::default());
        assert_eq!(monster.source, "");
        assert_eq!(monster.cr, "");
        assert_eq!(monster.size, vec![String::new()]);
        assert_eq!(monster.languages, vec![String::new()]);
        assert_eq!(
            monster.traits,
            vec![Trait {
                name: String::new(),
                entries: vec![String::new()],
            }]
        );
        assert_eq!(monster.actions.len(), 1);
    }

    #[test]
    fn missing_numbers_warn_once_per_field() {
        // 5 speeds, 6 abilities, ac and hpAverage are numeric.
        let (_, warnings) = count_warnings(|| parse_monster(&FormFields::default()));
        assert_eq!(warnings, 13);
    }

    #[test]
    fn every_field_round_trips() {
        let monster = parse_monster(&form(&[
            ("name", "Malgorgon"),
            ("source", "MG"),
            ("size", "L"),
            ("type", "Fiend"),
            ("alignment", "CE"),
            ("ac", "17"),
            ("acFrom", "natural armor"),
            ("hpAverage", "136"),
            ("hpFormula", "16d10 + 48"),
            ("walk", "40"),
            ("burrow", "5"),
            ("climb", "10"),
            ("fly", "60"),
            ("swim", "20"),
            ("str", "21"),
            ("dex", "14"),
            ("con", "17"),
            ("int", "12"),
            ("wis", "13"),
            ("cha", "18"),
            ("saveStr", "+9"),
            ("saveDex", "+6"),
            ("saveCon", "+7"),
            ("saveInt", "+5"),
            ("saveWis", "+5"),
            ("saveCha", "+8"),
            ("acrobatics", "+1"),
            ("animalHandling", "+2"),
            ("arcana", "+3"),
            ("athletics", "+4"),
            ("deception", "+5"),
            ("history", "+6"),
            ("insight", "+7"),
            ("intimidation", "+8"),
            ("investigation", "+9"),
            ("medicine", "+10"),
            ("nature", "+11"),
            ("perception", "+12"),
            ("performance", "+13"),
            ("persuasion", "+14"),
            ("religion", "+15"),
            ("sleightOfHand", "+16"),
            ("stealth", "+17"),
            ("survival", "+18"),
            ("resist", "cold, fire"),
            ("conditionImmune", "poisoned"),
            ("immune", "poison"),
            ("vulnerable", "radiant"),
            ("senses", "darkvision 120 ft."),
            ("languages", "Abyssal, telepathy 120 ft."),
            ("cr", "1/4"),
            ("traitName", "Magic Resistance"),
            ("traitEntry", "Advantage on saves against spells."),
            ("actionName", "Multiattack"),
            ("actionEntry", "Two claw attacks."),
        ]));

        assert_eq!(monster.name, "Malgorgon");
        assert_eq!(monster.source, "MG");
        assert_eq!(monster.size, vec!["L"]);
        assert_eq!(monster.creature_type, "fiend");
        assert_eq!(monster.alignment, vec!["CE"]);
        assert_eq!(monster.ac[0].ac, 17);
        assert_eq!(monster.ac[0].from, vec!["natural armor"]);
        assert_eq!(monster.hp.average, 136);
        assert_eq!(monster.hp.formula, "16d10 + 48");
        assert_eq!(
            monster.speed,
            Speed {
                walk: 40,
                burrow: 5,
                climb: 10,
                fly: 60,
                swim: 20,
            }
        );
        assert_eq!(
            [monster.str, monster.dex, monster.con, monster.int, monster.wis, monster.cha],
            [21, 14, 17, 12, 13, 18]
        );
        assert_eq!(monster.save.str, "+9");
        assert_eq!(monster.save.cha, "+8");
        assert_eq!(monster.skill.acrobatics, "+1");
        assert_eq!(monster.skill.animal_handling, "+2");
        assert_eq!(monster.skill.sleight_of_hand, "+16");
        assert_eq!(monster.skill.survival, "+18");
        assert_eq!(monster.resist, vec!["cold, fire"]);
        assert_eq!(monster.condition_immune, vec!["poisoned"]);
        assert_eq!(monster.immune, vec!["poison"]);
        assert_eq!(monster.vulnerable, vec!["radiant"]);
        assert_eq!(monster.senses, vec!["darkvision 120 ft."]);
        assert_eq!(monster.languages, vec!["Abyssal, telepathy 120 ft."]);
        assert_eq!(monster.cr, "1/4");
        assert_eq!(monster.traits[0].name, "Magic Resistance");
        assert_eq!(
            monster.traits[0].entries,
            vec!["Advantage on saves against spells."]
        );
        assert_eq!(monster.actions[0].name, "Multiattack");
        assert_eq!(monster.actions[0].entries, vec!["Two claw attacks."]);
    }

    #[test]
    fn only_type_is_lower_cased() {
        let monster = parse_monster(&form(&[
            ("type", "HUMANOID (Goblinoid)"),
            ("size", "Small"),
            ("alignment", "Neutral Evil"),
            ("name", "GOBLIN Boss"),
        ]));

        assert_eq!(monster.creature_type, "humanoid (goblinoid)");
        assert_eq!(monster.size, vec!["Small"]);
        assert_eq!(monster.alignment, vec!["Neutral Evil"]);
        assert_eq!(monster.name, "GOBLIN Boss");
    }

    #[test]
    fn repeated_keys_keep_first_value_as_singleton() {
        let monster = parse_monster(&form(&[
            ("resist", "fire"),
            ("resist", "cold"),
            ("languages", "Common"),
            ("languages", "Goblin"),
        ]));

        assert_eq!(monster.resist, vec!["fire"]);
        assert_eq!(monster.languages, vec!["Common"]);
    }

    #[test]
    fn form_fields_missing_key_is_empty() {
        let fields = form(&[("name", "Goblin")]);
        assert_eq!(fields.get("name"), "Goblin");
        assert_eq!(fields.get("cr"), "");
    }

    #[test]
    fn decode_handles_plus_percent_and_bare_keys() {
        let pairs = decode_urlencoded(b"name=Goblin+Boss&senses=darkvision%2060%20ft.&&flag&cr=")
            .expect("valid form");

        assert_eq!(
            pairs,
            vec![
                ("name".to_string(), "Goblin Boss".to_string()),
                ("senses".to_string(), "darkvision 60 ft.".to_string()),
                ("flag".to_string(), String::new()),
                ("cr".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn decode_keeps_everything_after_first_equals() {
        let pairs = decode_urlencoded(b"hpFormula=2d8%2B2=11").expect("valid form");
        assert_eq!(pairs, vec![("hpFormula".to_string(), "2d8+2=11".to_string())]);
    }

    #[test]
    fn decode_rejects_malformed_escapes() {
        assert_eq!(
            decode_urlencoded(b"name=%zz"),
            Err(FormDecodeError::InvalidEscape("%zz".to_string()))
        );
        assert_eq!(
            decode_urlencoded(b"name=Goblin&ac=1%"),
            Err(FormDecodeError::InvalidEscape("%".to_string()))
        );
        assert_eq!(
            decode_urlencoded(b"n%4=x"),
            Err(FormDecodeError::InvalidEscape("%4".to_string()))
        );
        let message = decode_urlencoded(b"name=%zz")
            .expect_err("bad escape")
            .to_string();
        assert_eq!(message, r#"invalid URL escape "%zz""#);
    }

    #[test]
    fn decode_rejects_semicolon_separator() {
        let err = decode_urlencoded(b"name=Goblin;ac=15").expect_err("semicolon");
        assert_eq!(err, FormDecodeError::SemicolonSeparator);
        assert_eq!(err.to_string(), "invalid semicolon separator in query");
    }

    #[test]
    fn decode_empty_input_has_no_pairs() {
        assert_eq!(decode_urlencoded(b""), Ok(Vec::new()));
    }
}
