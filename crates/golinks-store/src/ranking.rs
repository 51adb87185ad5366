//! Listing helpers shared by the map-backed stores.
//!
//! Each helper takes the full set of records, drops disabled links, and
//! orders the rest with `name` as the tie-breaker so results are
//! deterministic.

use golinks_core::Link;

pub(crate) fn popular(links: impl IntoIterator<Item = Link>, size: usize) -> Vec<Link> {
    let mut active = active(links);
    active.sort_by(|a, b| b.views.cmp(&a.views).then_with(|| a.name.cmp(&b.name)));
    active.truncate(size);
    active
}

pub(crate) fn recent(links: impl IntoIterator<Item = Link>, size: usize) -> Vec<Link> {
    let mut active = active(links);
    sort_recent(&mut active);
    active.truncate(size);
    active
}

pub(crate) fn owned(links: impl IntoIterator<Item = Link>, email: &str) -> Vec<Link> {
    let mut owned: Vec<Link> = active(links)
        .into_iter()
        .filter(|l| l.is_owned_by(email))
        .collect();
    sort_recent(&mut owned);
    owned
}

pub(crate) fn query(links: impl IntoIterator<Item = Link>, text: &str) -> Vec<Link> {
    let needle = text.to_lowercase();
    let mut matched: Vec<Link> = active(links)
        .into_iter()
        .filter(|l| l.matches_query(&needle))
        .collect();
    matched.sort_by(|a, b| b.views.cmp(&a.views).then_with(|| a.name.cmp(&b.name)));
    matched
}

/// First active link (by name) whose URL equals `url`, ignoring case.
pub(crate) fn by_url(links: impl IntoIterator<Item = Link>, url: &str) -> Option<Link> {
    let wanted = url.to_lowercase();
    active(links)
        .into_iter()
        .filter(|l| l.url.to_lowercase() == wanted)
        .min_by(|a, b| a.name.cmp(&b.name))
}

fn active(links: impl IntoIterator<Item = Link>) -> Vec<Link> {
    links.into_iter().filter(Link::is_active).collect()
}

fn sort_recent(links: &mut [Link]) {
    links.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| a.name.cmp(&b.name))
    });
}
