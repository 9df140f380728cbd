use super::domain::OrganizationProfile;

const KEY_FIELDS: u32 = 6;

/// Share of the six key profile fields the caller actually supplied, as 0-100.
///
/// Independent of the match score; callers use it to discount matches computed mostly
/// from defaults.
pub fn estimate(profile: &OrganizationProfile) -> u8 {
    let present = [
        profile.organization_type.is_some(),
        profile.employee_count.is_some(),
        profile
            .sectors
            .as_ref()
            .is_some_and(|sectors| sectors.iter().any(|sector| !sector.trim().is_empty())),
        profile.annual_revenue.is_some(),
        profile
            .location
            .as_deref()
            .is_some_and(|location| !location.trim().is_empty()),
        profile.previous_grants.is_some(),
    ]
    .into_iter()
    .filter(|present| *present)
    .count() as u32;

    let ratio = f64::from(present.min(KEY_FIELDS)) / f64::from(KEY_FIELDS);
    (ratio * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::domain::OrganizationType;

    #[test]
    fn empty_profile_has_no_confidence() {
        assert_eq!(estimate(&OrganizationProfile::default()), 0);
    }

    #[test]
    fn two_known_fields_yield_a_third() {
        let profile = OrganizationProfile {
            organization_type: Some(OrganizationType::Private),
            employee_count: Some(12),
            ..OrganizationProfile::default()
        };
        assert_eq!(estimate(&profile), 33);
    }

    #[test]
    fn blank_collections_do_not_count() {
        let profile = OrganizationProfile {
            sectors: Some(Default::default()),
            location: Some("   ".to_string()),
            ..OrganizationProfile::default()
        };
        assert_eq!(estimate(&profile), 0);
    }

    #[test]
    fn complete_profile_is_fully_confident() {
        let profile = OrganizationProfile {
            organization_type: Some(OrganizationType::Nonprofit),
            employee_count: Some(4),
            sectors: Some(["culture".to_string()].into_iter().collect()),
            annual_revenue: Some(0.0),
            location: Some("Lisbon".to_string()),
            previous_grants: Some(0),
            ..OrganizationProfile::default()
        };
        assert_eq!(estimate(&profile), 100);
    }
}
