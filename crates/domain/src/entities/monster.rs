//! Monster entity - a single creature stat block
//!
//! The JSON layout follows the 5etools homebrew `monster` schema so exported
//! files can be dropped straight into a homebrew collection.
//!
//! List-typed fields allow many entries, but a form submission only ever
//! carries one value per key, so records built from the authoring form hold
//! exactly one element in each list.
//!
//! Every field is optional when deserializing; absent keys take their zero value.

use serde::{Deserialize, Serialize};

/// A creature stat block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Monster {
    pub name: String,
    pub source: String,
    pub size: Vec<String>,
    /// Creature type, always lower-case (e.g. "humanoid").
    #[serde(rename = "type")]
    pub creature_type: String,
    pub alignment: Vec<String>,
    pub ac: Vec<ArmorClass>,
    pub hp: HitPoints,
    pub speed: Speed,
    pub str: i64,
    pub dex: i64,
    pub con: i64,
    pub int: i64,
    pub wis: i64,
    pub cha: i64,
    pub save: Save,
    pub skill: Skill,
    pub resist: Vec<String>,
    pub condition_immune: Vec<String>,
    pub immune: Vec<String>,
    pub vulnerable: Vec<String>,
    pub senses: Vec<String>,
    pub languages: Vec<String>,
    /// Challenge rating. Kept as text because ratings like "1/4" are not integral.
    pub cr: String,
    #[serde(rename = "trait")]
    pub traits: Vec<Trait>,
    #[serde(rename = "action")]
    pub actions: Vec<Action>,
}

/// One armor class entry and where it comes from ("natural armor", "shield").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmorClass {
    pub ac: i64,
    pub from: Vec<String>,
}

/// Average hit points plus the dice formula they come from.
///
/// The formula is free text and never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitPoints {
    pub average: i64,
    pub formula: String,
}

/// Movement rates in feet. Zero means both "not set" and "cannot move this way".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Speed {
    pub walk: i64,
    pub burrow: i64,
    pub climb: i64,
    pub fly: i64,
    pub swim: i64,
}

/// Saving throw modifiers as written on the stat block (e.g. "+4").
///
/// An empty string means the creature is not proficient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Save {
    pub str: String,
    pub dex: String,
    pub con: String,
    pub int: String,
    pub wis: String,
    pub cha: String,
}

/// Skill modifiers as written on the stat block. Empty means not listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub acrobatics: String,
    pub animal_handling: String,
    pub arcana: String,
    pub athletics: String,
    pub deception: String,
    pub history: String,
    pub insight: String,
    pub intimidation: String,
    pub investigation: String,
    pub medicine: String,
    pub nature: String,
    pub perception: String,
    pub performance: String,
    pub persuasion: String,
    pub religion: String,
    pub sleight_of_hand: String,
    pub stealth: String,
    pub survival: String,
}

/// A passive feature such as "Nimble Escape".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trait {
    pub name: String,
    pub entries: Vec<String>,
}

/// Something the monster can do on its turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    pub name: String,
    pub entries: Vec<String>,
}
