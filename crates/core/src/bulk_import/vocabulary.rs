//! Fixed internal enumerations and the mapping tables from the external
//! JIRA vocabulary onto them.
//!
//! Every mapper is total: any input yields exactly one internal value. The
//! fallbacks differ on purpose and must stay as they are (unknown weather
//! becomes [`Weather::Clear`], unknown road type becomes [`Scene::Mixed`]).

use super::payload::{DayTimeInput, IssueKind};

// ── Internal enumerations ────────────────────────────────────────────

/// Weather condition stored on a subtask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weather {
    Clear,
    Fog,
    Overcast,
    Rain,
    Snow,
    Mixed,
}

impl Weather {
    pub const ALL: [Weather; 6] = [
        Self::Clear,
        Self::Fog,
        Self::Overcast,
        Self::Rain,
        Self::Snow,
        Self::Mixed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Fog => "Fog",
            Self::Overcast => "Overcast",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Mixed => "Mixed",
        }
    }
}

/// Driving scene stored on a subtask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Highway,
    Urban,
    Rural,
    SubUrban,
    TestTrack,
    Mixed,
}

impl Scene {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Highway => "Highway",
            Self::Urban => "Urban",
            Self::Rural => "Rural",
            Self::SubUrban => "Sub-Urban",
            Self::TestTrack => "Test Track",
            Self::Mixed => "Mixed",
        }
    }
}

/// Internal subtask type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtaskType {
    Events,
    Hours,
    Loops,
}

impl SubtaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Hours => "hours",
            Self::Loops => "loops",
        }
    }
}

// ── Day-time tokens ──────────────────────────────────────────────────

pub const DAY_TIME_DAY: &str = "day";
pub const DAY_TIME_NIGHT: &str = "night";
pub const DAY_TIME_DUSK: &str = "dusk";
pub const DAY_TIME_DAWN: &str = "dawn";

/// All internal day-time tokens, in the order `"Mixed"` expands to.
pub const ALL_DAY_TIMES: [&str; 4] = [DAY_TIME_DAY, DAY_TIME_NIGHT, DAY_TIME_DUSK, DAY_TIME_DAWN];

/// External single day-time token -> internal token.
const DAY_TIME_TABLE: &[(&str, &str)] = &[
    ("Day", DAY_TIME_DAY),
    ("Night", DAY_TIME_NIGHT),
    ("Dusk", DAY_TIME_DUSK),
    ("Dawn", DAY_TIME_DAWN),
];

/// External day-time value expanding to every internal token.
const DAY_TIME_MIXED: &str = "Mixed";

// ── Road types ───────────────────────────────────────────────────────

/// External road-type vocabulary with a direct scene mapping.
///
/// JIRA writes the suburban road type as `Suburban`; the hyphenated
/// `Sub-Urban` only appears inside compound values and is resolved through
/// the compound rule.
const ROAD_TYPE_TABLE: &[(&str, Scene)] = &[
    ("Highway", Scene::Highway),
    ("Urban", Scene::Urban),
    ("Rural", Scene::Rural),
    ("Suburban", Scene::SubUrban),
    ("Test Track", Scene::TestTrack),
    ("Mixed", Scene::Mixed),
];

/// Separator of compound road-type values such as `Rural/Sub-Urban`.
pub const ROAD_TYPE_SEPARATOR: char = '/';

// ── Mappers ──────────────────────────────────────────────────────────

/// Returns `true` for the explicit "unknown" weather marker (any case).
pub fn is_unknown_weather(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("unknown")
}

/// Map an external weather value.
///
/// Exact (case-sensitive) internal names map to themselves, `unknown` in any
/// case maps to [`Weather::Mixed`], everything else (including absence) to
/// [`Weather::Clear`].
pub fn map_weather(raw: Option<&str>) -> Weather {
    let Some(raw) = raw else {
        return Weather::Clear;
    };
    if let Some(direct) = Weather::ALL.into_iter().find(|w| w.as_str() == raw) {
        return direct;
    }
    if is_unknown_weather(raw) {
        return Weather::Mixed;
    }
    Weather::Clear
}

/// Returns `true` when a road type is a compound (`a/b`) value.
pub fn is_compound_road_type(raw: &str) -> bool {
    raw.contains(ROAD_TYPE_SEPARATOR)
}

fn lookup_road_type(raw: &str) -> Option<Scene> {
    ROAD_TYPE_TABLE
        .iter()
        .find(|(external, _)| *external == raw)
        .map(|(_, scene)| *scene)
}

/// Map an external road type onto a [`Scene`].
///
/// Direct table hits win. Compound values take the first segment with a
/// direct mapping. Anything unrecognized (including absence) is
/// [`Scene::Mixed`].
pub fn map_scene(raw: Option<&str>) -> Scene {
    let Some(raw) = raw.map(str::trim) else {
        return Scene::Mixed;
    };
    if let Some(scene) = lookup_road_type(raw) {
        return scene;
    }
    if is_compound_road_type(raw) {
        if let Some(scene) = raw
            .split(ROAD_TYPE_SEPARATOR)
            .find_map(|segment| lookup_road_type(segment.trim()))
        {
            return scene;
        }
    }
    Scene::Mixed
}

/// Map an external day-time value onto internal tokens.
///
/// Sequences pass through untouched, `"Mixed"` expands to all four tokens,
/// single tokens go through the table, anything else is empty.
pub fn map_day_time(raw: Option<&DayTimeInput>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(DayTimeInput::Sequence(tokens)) => tokens.clone(),
        Some(DayTimeInput::Single(token)) if token == DAY_TIME_MIXED => {
            ALL_DAY_TIMES.iter().map(|t| t.to_string()).collect()
        }
        Some(DayTimeInput::Single(token)) => DAY_TIME_TABLE
            .iter()
            .find(|(external, _)| external == token)
            .map(|(_, internal)| vec![internal.to_string()])
            .unwrap_or_default(),
    }
}

/// Map the external issue type onto the internal subtask type.
///
/// Calibration parents and `Sub Task` rows are always `events`.
pub fn map_subtask_type(kind: IssueKind, calibration: bool) -> SubtaskType {
    if calibration || kind == IssueKind::SubTask {
        return SubtaskType::Events;
    }
    match kind.as_str().to_lowercase().as_str() {
        "hours" => SubtaskType::Hours,
        "loops" => SubtaskType::Loops,
        _ => SubtaskType::Events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- weather --

    #[test]
    fn weather_exact_names_map_to_themselves() {
        for w in Weather::ALL {
            assert_eq!(map_weather(Some(w.as_str())), w, "weather: {}", w.as_str());
        }
    }

    #[test]
    fn weather_unknown_maps_to_mixed() {
        assert_eq!(map_weather(Some("Unknown")), Weather::Mixed);
        assert_eq!(map_weather(Some("unknown")), Weather::Mixed);
        assert_eq!(map_weather(Some("UNKNOWN")), Weather::Mixed);
    }

    #[test]
    fn weather_unrecognized_defaults_to_clear() {
        assert_eq!(map_weather(Some("Sunny")), Weather::Clear);
        assert_eq!(map_weather(Some("rain")), Weather::Clear);
        assert_eq!(map_weather(Some("")), Weather::Clear);
        assert_eq!(map_weather(None), Weather::Clear);
    }

    #[test]
    fn weather_mapping_is_idempotent() {
        for raw in ["Fog", "unknown", "Hail", "Snow"] {
            let once = map_weather(Some(raw));
            assert_eq!(map_weather(Some(once.as_str())), once, "raw: {raw}");
        }
    }

    // -- scene --

    #[test]
    fn scene_direct_lookup() {
        assert_eq!(map_scene(Some("Highway")), Scene::Highway);
        assert_eq!(map_scene(Some("Test Track")), Scene::TestTrack);
        assert_eq!(map_scene(Some("Suburban")), Scene::SubUrban);
    }

    #[test]
    fn scene_compound_takes_first_recognized_segment() {
        assert_eq!(map_scene(Some("Rural/Sub-Urban")), Scene::Rural);
        assert_eq!(map_scene(Some("Sub-Urban/Rural")), Scene::Rural);
        assert_eq!(map_scene(Some("Urban / Highway")), Scene::Urban);
    }

    #[test]
    fn scene_unrecognized_defaults_to_mixed() {
        assert_eq!(map_scene(Some("Foo/Bar")), Scene::Mixed);
        assert_eq!(map_scene(Some("Desert")), Scene::Mixed);
        assert_eq!(map_scene(None), Scene::Mixed);
    }

    // -- day time --

    #[test]
    fn day_time_mixed_expands_to_all_tokens() {
        let mapped = map_day_time(Some(&DayTimeInput::Single("Mixed".into())));
        assert_eq!(mapped, vec!["day", "night", "dusk", "dawn"]);
    }

    #[test]
    fn day_time_sequence_passes_through() {
        let input = DayTimeInput::Sequence(vec!["day".into(), "night".into()]);
        assert_eq!(map_day_time(Some(&input)), vec!["day", "night"]);
    }

    #[test]
    fn day_time_single_token_maps_through_table() {
        let mapped = map_day_time(Some(&DayTimeInput::Single("Dusk".into())));
        assert_eq!(mapped, vec!["dusk"]);
    }

    #[test]
    fn day_time_unrecognized_is_empty() {
        assert!(map_day_time(Some(&DayTimeInput::Single("Noon".into()))).is_empty());
        assert!(map_day_time(None).is_empty());
    }

    // -- subtask type --

    #[test]
    fn subtask_type_follows_issue_kind() {
        assert_eq!(map_subtask_type(IssueKind::Hours, false), SubtaskType::Hours);
        assert_eq!(map_subtask_type(IssueKind::Loops, false), SubtaskType::Loops);
        assert_eq!(map_subtask_type(IssueKind::Events, false), SubtaskType::Events);
    }

    #[test]
    fn sub_task_and_calibration_force_events() {
        assert_eq!(map_subtask_type(IssueKind::SubTask, false), SubtaskType::Events);
        assert_eq!(map_subtask_type(IssueKind::Hours, true), SubtaskType::Events);
        assert_eq!(map_subtask_type(IssueKind::Loops, true), SubtaskType::Events);
    }
}
