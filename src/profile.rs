use std::fmt;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Competitions,
    Datasets,
    Notebooks,
    Discussions,
}

impl Category {
    /// Table order. Marker matching and output both follow it.
    pub const ALL: [Category; 4] = [
        Category::Competitions,
        Category::Datasets,
        Category::Notebooks,
        Category::Discussions,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::Competitions => "competitions",
            Category::Datasets => "datasets",
            Category::Notebooks => "notebooks",
            Category::Discussions => "discussions",
        }
    }

    /// Substring that locates the category in page text.
    pub fn marker(self) -> &'static str {
        match self {
            Category::Competitions => "Competition",
            Category::Datasets => "Dataset",
            Category::Notebooks => "Notebook",
            Category::Discussions => "Discussion",
        }
    }

    /// First category (in table order) whose marker occurs in `line`.
    pub fn find_in(line: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|c| line.contains(c.marker()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Progression tiers, lowest first so the derived `Ord` matches seniority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    #[default]
    Novice,
    Kaggler,
    Contributor,
    Expert,
    Master,
    Grandmaster,
}

impl Tier {
    pub const ALL: [Tier; 6] = [
        Tier::Novice,
        Tier::Kaggler,
        Tier::Contributor,
        Tier::Expert,
        Tier::Master,
        Tier::Grandmaster,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tier::Novice => "Novice",
            Tier::Kaggler => "Kaggler",
            Tier::Contributor => "Contributor",
            Tier::Expert => "Expert",
            Tier::Master => "Master",
            Tier::Grandmaster => "Grandmaster",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Tier::Grandmaster => "#d4af37",
            Tier::Master => "#ff8c00",
            Tier::Expert => "#9370db",
            Tier::Contributor => "#32cd32",
            Tier::Kaggler | Tier::Novice => "#20beff",
        }
    }

    /// Exact, case-sensitive label match.
    pub fn from_label(s: &str) -> Option<Tier> {
        Self::ALL.into_iter().find(|t| t.label() == s)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Tier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Tier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Tier::from_label(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown tier: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Medals {
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
}

impl Medals {
    pub fn is_empty(&self) -> bool {
        self.gold == 0 && self.silver == 0 && self.bronze == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub tier: Tier,
    #[serde(serialize_with = "rank_to_string", deserialize_with = "rank_from_any")]
    pub rank: Option<u32>,
    pub medals: Medals,
}

/// One record per category, held as fields so none can go missing.
/// Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    #[serde(default)]
    pub competitions: Record,
    #[serde(default)]
    pub datasets: Record,
    #[serde(default)]
    pub notebooks: Record,
    #[serde(default)]
    pub discussions: Record,
}

impl Profile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            competitions: Record::default(),
            datasets: Record::default(),
            notebooks: Record::default(),
            discussions: Record::default(),
        }
    }

    pub fn record(&self, category: Category) -> &Record {
        match category {
            Category::Competitions => &self.competitions,
            Category::Datasets => &self.datasets,
            Category::Notebooks => &self.notebooks,
            Category::Discussions => &self.discussions,
        }
    }

    pub fn record_mut(&mut self, category: Category) -> &mut Record {
        match category {
            Category::Competitions => &mut self.competitions,
            Category::Datasets => &mut self.datasets,
            Category::Notebooks => &mut self.notebooks,
            Category::Discussions => &mut self.discussions,
        }
    }

    pub fn records(&self) -> impl Iterator<Item = (Category, &Record)> {
        Category::ALL.into_iter().map(move |c| (c, self.record(c)))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let profile: Profile =
            serde_json::from_str(json).context("Failed to parse profile document")?;
        if profile.username.trim().is_empty() {
            bail!("Profile document has an empty username");
        }
        Ok(profile)
    }

    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid profile {}", path.display()))
    }
}

// The original tool wrote rank as a string ("463"), keep that on disk.
fn rank_to_string<S: Serializer>(
    rank: &Option<u32>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match rank {
        Some(r) => serializer.serialize_str(&r.to_string()),
        None => serializer.serialize_none(),
    }
}

fn rank_from_any<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<u32>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRank {
        Num(u32),
        Text(String),
    }

    match Option::<RawRank>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawRank::Num(0)) => Ok(None),
        Some(RawRank::Num(n)) => Ok(Some(n)),
        Some(RawRank::Text(s)) => {
            let digits = s.trim().replace(',', "");
            if digits.is_empty() {
                return Ok(None);
            }
            match digits.parse::<u32>() {
                Ok(0) => Ok(None),
                Ok(n) => Ok(Some(n)),
                Err(_) => Err(serde::de::Error::custom(format!("invalid rank: {}", s))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_defaults() {
        let p = Profile::new("someone");
        for (_, r) in p.records() {
            assert_eq!(r.tier, Tier::Novice);
            assert_eq!(r.rank, None);
            assert_eq!(r.medals, Medals::default());
        }
        assert_eq!(p.records().count(), 4);
    }

    #[test]
    fn marker_lookup_uses_table_order() {
        assert_eq!(Category::find_in("Notebook Tier"), Some(Category::Notebooks));
        assert_eq!(
            Category::find_in("Competition and Dataset"),
            Some(Category::Competitions)
        );
        assert_eq!(Category::find_in("Discussions"), Some(Category::Discussions));
        assert_eq!(Category::find_in("notebook"), None);
    }

    #[test]
    fn tier_labels_are_exact() {
        assert_eq!(Tier::from_label("Expert"), Some(Tier::Expert));
        assert_eq!(Tier::from_label("expert"), None);
        assert_eq!(Tier::from_label("Expert "), None);
        assert!(Tier::Grandmaster > Tier::Master);
        assert!(Tier::Contributor > Tier::Kaggler);
        assert_eq!(Tier::default(), Tier::Novice);
    }

    #[test]
    fn json_key_order_and_rank_as_string() {
        let mut p = Profile::new("kakuteki");
        p.notebooks.tier = Tier::Expert;
        p.notebooks.rank = Some(463);
        let json = serde_json::to_string(&p).unwrap();

        let keys = ["\"username\"", "\"competitions\"", "\"datasets\"", "\"notebooks\"", "\"discussions\""];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", json);
        assert!(json.contains("\"rank\":\"463\""));
        assert!(json.contains("\"rank\":null"));
    }

    #[test]
    fn load_manual_document() {
        let json = r#"{
            "username": "kakuteki",
            "competitions": {"tier": "Kaggler", "rank": null, "medals": {"gold": 0, "silver": 0, "bronze": 0}},
            "datasets": {"tier": "Novice", "rank": null, "medals": {"gold": 0, "silver": 0, "bronze": 0}},
            "notebooks": {"tier": "Expert", "rank": "463", "medals": {"gold": 0, "silver": 1, "bronze": 17}},
            "discussions": {"tier": "Novice", "rank": null, "medals": {"gold": 0, "silver": 0, "bronze": 0}}
        }"#;
        let p = Profile::from_json(json).unwrap();
        assert_eq!(p.competitions.tier, Tier::Kaggler);
        assert_eq!(p.notebooks.rank, Some(463));
        assert_eq!(p.notebooks.medals, Medals { gold: 0, silver: 1, bronze: 17 });
    }

    #[test]
    fn shipped_profile_document_loads() {
        let p = Profile::load(std::path::Path::new("data/profile.json")).unwrap();
        assert_eq!(p.username, "kakuteki");
        assert_eq!(p.competitions.tier, Tier::Kaggler);
        assert_eq!(
            p.notebooks,
            Record {
                tier: Tier::Expert,
                rank: Some(463),
                medals: Medals { gold: 0, silver: 1, bronze: 17 },
            }
        );
    }

    #[test]
    fn load_accepts_numeric_rank_and_missing_fields() {
        let json = r#"{"username": "x", "datasets": {"rank": 1200}, "discussions": {"rank": "1,024"}}"#;
        let p = Profile::from_json(json).unwrap();
        assert_eq!(p.datasets.rank, Some(1200));
        assert_eq!(p.discussions.rank, Some(1024));
        assert_eq!(p.competitions, Record::default());
    }

    #[test]
    fn load_rejects_unknown_tier_and_blank_username() {
        assert!(Profile::from_json(r#"{"username": "x", "notebooks": {"tier": "Wizard"}}"#).is_err());
        assert!(Profile::from_json(r#"{"username": "  "}"#).is_err());
    }
}
