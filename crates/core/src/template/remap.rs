//! Source-specific numbering schemes for seasons and episodes.
//!
//! T411 filtered by season and episode through category ids rather than
//! numbers. Templates opt in with `{season+t411season}` and
//! `{episode+t411episode}`.

/// T411 season term id. Season 0 is the "complete series" term.
pub fn t411_season(season: u32) -> u32 {
    if season == 0 {
        998
    } else {
        season.saturating_add(967)
    }
}

/// T411 episode term id. Ids skip 945, so episodes from 9 on shift by one.
///
/// Both mappings saturate at `u32::MAX`.
pub fn t411_episode(episode: u32) -> u32 {
    match episode {
        0 => 936,
        1..=8 => 936 + episode,
        _ => episode.saturating_add(937),
    }
}
