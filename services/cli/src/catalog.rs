use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use grant_match::error::AppError;
use grant_match::matching::{Grant, GrantId, OrganizationProfile};
use serde::de::DeserializeOwned;
use tracing::debug;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = File::open(path)?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}

pub(crate) fn load_profile(path: &Path) -> Result<OrganizationProfile, AppError> {
    let profile: OrganizationProfile = read_json(path)?;
    debug!(path = %path.display(), name = ?profile.name, "loaded organization profile");
    Ok(profile)
}

pub(crate) fn load_catalog(path: &Path) -> Result<Vec<Grant>, AppError> {
    let grants: Vec<Grant> = read_json(path)?;
    debug!(path = %path.display(), grants = grants.len(), "loaded grant catalog");
    Ok(grants)
}

pub(crate) fn find_grant<'a>(grants: &'a [Grant], id: &str) -> Result<&'a Grant, AppError> {
    let wanted = GrantId(id.trim().to_string());
    grants
        .iter()
        .find(|grant| grant.id == wanted)
        .ok_or_else(|| AppError::GrantNotFound(wanted.0))
}
