//! Console rendering of a [`ResultSet`]
use celestia_common::ResultSet;

const NAME_HEADER: &str = "Body";
const MOONS_HEADER: &str = "Moons";
const GRAVITY_HEADER: &str = "Avg. moon gravity (m/s²)";

/// Render one row per body followed by a summary line.
pub fn render_table(results: &ResultSet) -> String {
    if results.is_empty() {
        return "No bodies returned by the catalog.\n".to_string();
    }

    let name_width = results
        .iter()
        .map(|b| b.name.chars().count())
        .chain(std::iter::once(NAME_HEADER.len()))
        .max()
        .unwrap_or(NAME_HEADER.len());

    let row = |name: &str, moons: &str, gravity: &str| {
        format!("{:<name_width$}  {:>5}  {}\n", name, moons, gravity)
    };
    let rule_width = name_width + 2 + 5 + 2 + GRAVITY_HEADER.chars().count();

    let mut out = row(NAME_HEADER, MOONS_HEADER, GRAVITY_HEADER);
    out.push_str(&"-".repeat(rule_width));
    out.push('\n');

    for body in results {
        let gravity = body
            .average_satellite_gravity
            .map(|g| format!("{:.4}", g))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&row(&body.name, &body.satellites.len().to_string(), &gravity));
    }

    let with_moons = results.iter().filter(|b| !b.satellites.is_empty()).count();
    out.push_str(&format!(
        "\n{} bodies, {} with moons, {} moons fetched ({} UTC)\n",
        results.len(),
        with_moons,
        results.satellite_count(),
        results.fetched_at.format("%Y-%m-%d %H:%M:%S")
    ));

    out
}

pub fn render_json(results: &ResultSet) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}
