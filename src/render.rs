use anyhow::Result;

use crate::profile::{Category, Profile, Record};

const LOGO: &str = "K";

const GOLD: &str = "#ffd700";
const SILVER: &str = "#c0c0c0";
const BRONZE: &str = "#cd7f32";

/// Render one category badge as standalone SVG markup.
///
/// Layout is fixed at 220x80: logo circle on the left, then the category
/// label, the tier in the tier colour, and an info line with `#<rank>` and
/// one indicator per nonzero medal count (gold, silver, bronze).
pub fn render_badge(category: Category, record: &Record) -> String {
    let c = record.tier.color();
    let cat = category.key();
    let label = category.key().to_uppercase();
    let tier = record.tier.label();

    let mut info: Vec<String> = Vec::new();
    if let Some(rank) = record.rank {
        info.push(format!("#{}", rank));
    }
    for (prefix, count, color) in [
        ("G", record.medals.gold, GOLD),
        ("S", record.medals.silver, SILVER),
        ("B", record.medals.bronze, BRONZE),
    ] {
        if count > 0 {
            info.push(format!(r#"<tspan fill="{}">{}{}</tspan>"#, color, prefix, count));
        }
    }
    let info = info.join(" ");

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="220" height="80">
<defs><linearGradient id="bg_{cat}" x1="0%" y1="0%" x2="100%" y2="100%">
<stop offset="0%" style="stop-color:#1a1a2e"/><stop offset="100%" style="stop-color:#16213e"/></linearGradient></defs>
<rect width="220" height="80" rx="10" fill="url(#bg_{cat})" stroke="{c}" stroke-width="2"/>
<circle cx="35" cy="40" r="20" fill="{c}" opacity="0.2"/>
<text x="35" y="46" font-family="Arial" font-size="20" fill="{c}" text-anchor="middle">{LOGO}</text>
<text x="70" y="25" font-family="Arial" font-size="12" fill="#888">{label}</text>
<text x="70" y="48" font-family="Arial" font-size="18" font-weight="bold" fill="{c}">{tier}</text>
<text x="70" y="68" font-family="Arial" font-size="11" fill="#aaa">{info}</text>
</svg>"##
    )
}

/// Pretty JSON summary, keys in profile order.
pub fn render_json(profile: &Profile) -> Result<String> {
    Ok(serde_json::to_string_pretty(profile)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Medals, Tier};

    fn info_line(svg: &str) -> &str {
        let line = svg.lines().find(|l| l.contains(r#"y="68""#)).unwrap();
        let start = line.find('>').unwrap() + 1;
        let end = line.rfind("</text>").unwrap();
        &line[start..end]
    }

    #[test]
    fn novice_without_rank_or_medals() {
        let svg = render_badge(Category::Datasets, &Record::default());
        assert_eq!(info_line(&svg), "");
        assert!(!svg.contains("<tspan"));
        assert!(svg.contains(">Novice</text>"));
        assert!(svg.contains(">DATASETS</text>"));
        assert!(svg.contains(r#"id="bg_datasets""#));
        assert!(svg.contains("#20beff"));
    }

    #[test]
    fn medals_in_fixed_order_skipping_zero() {
        let record = Record {
            tier: Tier::Master,
            rank: None,
            medals: Medals { gold: 2, silver: 0, bronze: 5 },
        };
        let svg = render_badge(Category::Competitions, &record);
        let info = info_line(&svg);
        assert!(!info.contains(">S"));
        let g = info.find(">G2<").unwrap();
        let b = info.find(">B5<").unwrap();
        assert!(g < b);
        assert!(svg.contains(r##"stroke="#ff8c00""##));
    }

    #[test]
    fn rank_marker_first() {
        let record = Record {
            tier: Tier::Expert,
            rank: Some(463),
            medals: Medals { gold: 0, silver: 1, bronze: 17 },
        };
        let svg = render_badge(Category::Notebooks, &record);
        let info = info_line(&svg);
        assert!(info.starts_with("#463 "));
        assert!(info.contains(">S1<"));
        assert!(info.contains(">B17<"));
        assert!(svg.contains(">NOTEBOOKS</text>"));
        assert!(svg.contains(">K</text>"));
    }

    #[test]
    fn deterministic() {
        let record = Record {
            tier: Tier::Grandmaster,
            rank: Some(1),
            medals: Medals { gold: 9, silver: 9, bronze: 9 },
        };
        assert_eq!(
            render_badge(Category::Discussions, &record),
            render_badge(Category::Discussions, &record)
        );
    }

    #[test]
    fn json_summary_is_pretty() {
        let json = render_json(&Profile::new("kakuteki")).unwrap();
        assert!(json.starts_with("{\n  \"username\": \"kakuteki\",\n  \"competitions\": {"));
        assert!(json.contains("\"rank\": null"));
    }
}
