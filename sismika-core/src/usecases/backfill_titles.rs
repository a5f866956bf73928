use super::{prelude::*, resolve_title::resolve_title};

/// Recomputes every event title against the current gazetteer.
///
/// Events imported before the gazetteer was loaded carry empty titles;
/// a refreshed gazetteer can also move which place is nearest. Only
/// titles that actually changed are written back, and the number of
/// rewrites is returned. With an empty gazetteer nothing is touched
/// and the lookup failure is passed on.
pub fn backfill_titles<R>(repo: &R) -> Result<usize>
where
    R: EarthquakeRepo + LocationRepo,
{
    let mut rewritten = 0;
    for event in repo.all_earthquakes()? {
        let title = resolve_title(repo, event.epicenter)?;
        if title != event.title {
            repo.update_earthquake_title(event.id.as_str(), &title)?;
            rewritten += 1;
        }
    }
    if rewritten > 0 {
        log::info!("Rewrote {rewritten} earthquake titles");
    }
    Ok(rewritten)
}
