//! Summary figures for the dashboard and reports pages.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Client, Module, Version};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleReleaseCount {
    pub module_id: String,
    pub module_name: String,
    pub versions: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReleases {
    /// `YYYY-MM`
    pub month: String,
    pub versions: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecentRelease {
    pub version_id: String,
    pub module_name: String,
    pub version_number: String,
    pub release_date: NaiveDate,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_modules: usize,
    pub total_clients: usize,
    pub total_versions: usize,
    /// Busiest modules first; ties by name.
    pub versions_per_module: Vec<ModuleReleaseCount>,
    /// Ascending by month. Undated versions are not counted.
    pub releases_per_month: Vec<MonthlyReleases>,
    /// Newest first.
    pub recent_releases: Vec<RecentRelease>,
}

impl DashboardStats {
    pub const DEFAULT_RECENT: usize = 5;

    pub fn compute(modules: &[Module], clients: &[Client], versions: &[Version]) -> Self {
        Self::compute_with_recent(modules, clients, versions, Self::DEFAULT_RECENT)
    }

    pub fn compute_with_recent(
        modules: &[Module],
        clients: &[Client],
        versions: &[Version],
        recent: usize,
    ) -> Self {
        let names: HashMap<&str, &str> = modules
            .iter()
            .map(|m| (m.id.as_str(), m.name.as_str()))
            .collect();
        let module_name = |id: &str| names.get(id).copied().unwrap_or(id).to_string();

        let mut per_module: HashMap<&str, usize> =
            modules.iter().map(|m| (m.id.as_str(), 0)).collect();
        let mut per_month: BTreeMap<String, usize> = BTreeMap::new();
        for version in versions {
            *per_module.entry(version.module_id.as_str()).or_insert(0) += 1;
            if let Some(date) = version.release_date {
                *per_month.entry(date.format("%Y-%m").to_string()).or_insert(0) += 1;
            }
        }

        let mut versions_per_module: Vec<ModuleReleaseCount> = per_module
            .into_iter()
            .map(|(id, count)| ModuleReleaseCount {
                module_id: id.to_string(),
                module_name: module_name(id),
                versions: count,
            })
            .collect();
        versions_per_module.sort_by(|a, b| {
            b.versions
                .cmp(&a.versions)
                .then_with(|| a.module_name.cmp(&b.module_name))
        });

        let mut dated: Vec<&Version> = versions.iter().filter(|v| v.release_date.is_some()).collect();
        dated.sort_by(|a, b| b.release_date.cmp(&a.release_date));
        let recent_releases = dated
            .into_iter()
            .take(recent)
            .filter_map(|v| {
                Some(RecentRelease {
                    version_id: v.id.clone(),
                    module_name: module_name(&v.module_id),
                    version_number: v.version_number.clone(),
                    release_date: v.release_date?,
                })
            })
            .collect();

        Self {
            total_modules: modules.len(),
            total_clients: clients.len(),
            total_versions: versions.len(),
            versions_per_module,
            releases_per_month: per_month
                .into_iter()
                .map(|(month, versions)| MonthlyReleases { month, versions })
                .collect(),
            recent_releases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn module(id: &str, name: &str) -> Module {
        Module {
            id: id.into(),
            name: name.into(),
            description: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn version(id: &str, module_id: &str, date: Option<(i32, u32, u32)>) -> Version {
        Version {
            id: id.into(),
            module_id: module_id.into(),
            version_number: format!("1.0.{id}"),
            release_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            notes: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_inputs() {
        let stats = DashboardStats::compute(&[], &[], &[]);
        assert_eq!(stats, DashboardStats::default());
    }

    #[test]
    fn test_counts_and_ordering() {
        let modules = vec![module("m1", "billing"), module("m2", "auth"), module("m3", "idle")];
        let versions = vec![
            version("1", "m1", Some((2024, 3, 10))),
            version("2", "m1", Some((2024, 1, 5))),
            version("3", "m2", Some((2024, 3, 1))),
            version("4", "m2", None),
            version("5", "m1", None),
        ];

        let stats = DashboardStats::compute(&modules, &[], &versions);
        assert_eq!(stats.total_modules, 3);
        assert_eq!(stats.total_versions, 5);

        let order: Vec<(&str, usize)> = stats
            .versions_per_module
            .iter()
            .map(|c| (c.module_name.as_str(), c.versions))
            .collect();
        assert_eq!(order, vec![("billing", 3), ("auth", 2), ("idle", 0)]);

        let months: Vec<(&str, usize)> = stats
            .releases_per_month
            .iter()
            .map(|m| (m.month.as_str(), m.versions))
            .collect();
        assert_eq!(months, vec![("2024-01", 1), ("2024-03", 2)]);

        let recent: Vec<&str> = stats.recent_releases.iter().map(|r| r.version_id.as_str()).collect();
        assert_eq!(recent, vec!["1", "3", "2"]);
        assert_eq!(stats.recent_releases[0].module_name, "billing");
    }

    #[test]
    fn test_recent_limit() {
        let modules = vec![module("m1", "core")];
        let versions: Vec<Version> = (1..=8)
            .map(|d| version(&d.to_string(), "m1", Some((2024, 2, d))))
            .collect();
        let stats = DashboardStats::compute_with_recent(&modules, &[], &versions, 3);
        assert_eq!(stats.recent_releases.len(), 3);
        assert_eq!(stats.recent_releases[0].version_id, "8");
    }

    #[test]
    fn test_orphan_version_uses_module_id() {
        let stats = DashboardStats::compute(&[], &[], &[version("1", "gone", Some((2024, 1, 1)))]);
        assert_eq!(stats.versions_per_module[0].module_name, "gone");
    }
}
