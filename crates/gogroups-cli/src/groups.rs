//! `list` and `map` command handlers.
//!
//! Both drive a [`GroupListController`]: load once, apply the filters, then
//! read the filtered view. Errors collected by the controller are printed,
//! never fatal.

use std::path::Path;

use gogroups_client::GroupsClient;
use gogroups_core::{
    AppConfig, CatalogFile, GroupListController, GroupRecord, MapRenderer, MarkerMap,
    SearchCriteria,
};

use crate::SourceArgs;

const NAME_WIDTH: usize = 30;

pub(crate) enum Source {
    Http(GroupsClient),
    Catalog(CatalogFile),
}

impl Source {
    /// Picks the data source from flags, falling back to the configured
    /// server base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub(crate) fn resolve(config: &AppConfig, args: &SourceArgs) -> anyhow::Result<Self> {
        if let Some(path) = &args.catalog {
            return Ok(Source::Catalog(CatalogFile::new(path)));
        }
        let client = match &args.base_url {
            Some(base_url) => {
                GroupsClient::new(base_url, config.request_timeout_secs, &config.user_agent)?
            }
            None => GroupsClient::from_config(config)?,
        };
        Ok(Source::Http(client))
    }
}

async fn load<M: MapRenderer>(
    ctrl: &mut GroupListController<M>,
    source: &Source,
    search: &SearchCriteria,
) {
    match source {
        Source::Http(client) => ctrl.load_groups(client).await,
        Source::Catalog(file) => ctrl.load_groups(file).await,
    }
    ctrl.set_search(search.clone());
}

/// Print the filtered group table, the member total, and any errors.
pub(crate) async fn run_list(source: &Source, search: &SearchCriteria) {
    let mut ctrl = GroupListController::new();
    load(&mut ctrl, source, search).await;

    print!("{}", render_table(ctrl.filtered()));
    println!("total members: {}", ctrl.total_members());
    print_errors(&ctrl);
}

/// Render the filtered view through a [`MarkerMap`] and write its GeoJSON.
///
/// # Errors
///
/// Returns an error if the output file cannot be written.
pub(crate) async fn run_map(
    source: &Source,
    search: &SearchCriteria,
    out: &Path,
    cell_degrees: f64,
) -> anyhow::Result<()> {
    let mut ctrl = GroupListController::with_map(MarkerMap::new(cell_degrees));
    load(&mut ctrl, source, search).await;
    print_errors(&ctrl);

    let Some(map) = ctrl.map() else {
        anyhow::bail!("map renderer missing");
    };
    let geojson = serde_json::to_string_pretty(&map.to_geojson())?;
    std::fs::write(out, geojson)
        .map_err(|e| anyhow::anyhow!("could not write {}: {e}", out.display()))?;

    let unplotted = ctrl.filtered().len() - map.markers().len();
    println!(
        "wrote {} clusters ({} markers, {} groups without a location) to {}",
        map.clusters().len(),
        map.markers().len(),
        unplotted,
        out.display()
    );
    Ok(())
}

fn print_errors<M: MapRenderer>(ctrl: &GroupListController<M>) {
    for error in ctrl.errors() {
        eprintln!("error: {error}");
    }
}

fn render_table(groups: &[GroupRecord]) -> String {
    use std::fmt::Write as _;

    if groups.is_empty() {
        return "no groups match\n".to_string();
    }

    let mut out = format!(
        "{:<32}{:<20}{:<9}{:<16}{:>8}\n",
        "NAME", "CITY", "COUNTRY", "CONTINENT", "MEMBERS"
    );
    for group in groups {
        let name = if group.name.chars().count() > NAME_WIDTH {
            format!("{}...", group.name.chars().take(NAME_WIDTH - 3).collect::<String>())
        } else {
            group.name.clone()
        };
        let continent = if group.continent.is_empty() {
            "\u{2014}"
        } else {
            group.continent.as_str()
        };
        let _ = writeln!(
            out,
            "{:<32}{:<20}{:<9}{:<16}{:>8}",
            name, group.city, group.country, continent, group.members
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, continent: &str, members: u64) -> GroupRecord {
        GroupRecord {
            name: name.to_string(),
            url: String::new(),
            members,
            city: "San Mateo".to_string(),
            country: "US".to_string(),
            continent: continent.to_string(),
            lat: None,
            lon: None,
        }
    }

    fn config_with_base_url(api_base_url: &str) -> AppConfig {
        AppConfig {
            env: gogroups_core::Environment::Test,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "info".to_string(),
            groups_path: "groups.yaml".into(),
            response_shape: gogroups_core::ResponseShape::Current,
            api_base_url: api_base_url.to_string(),
            request_timeout_secs: 5,
            user_agent: "gogroups-test".to_string(),
        }
    }

    #[test]
    fn resolve_uses_configured_base_url_without_flag() {
        let args = SourceArgs {
            base_url: None,
            catalog: None,
        };
        assert!(matches!(
            Source::resolve(&config_with_base_url("http://localhost:8080"), &args),
            Ok(Source::Http(_))
        ));
        assert!(Source::resolve(&config_with_base_url("ftp://nope"), &args).is_err());
    }

    #[test]
    fn resolve_prefers_base_url_flag_over_config() {
        let args = SourceArgs {
            base_url: Some("http://localhost:9000".to_string()),
            catalog: None,
        };
        assert!(matches!(
            Source::resolve(&config_with_base_url("ftp://nope"), &args),
            Ok(Source::Http(_))
        ));
    }

    #[test]
    fn resolve_prefers_catalog_flag() {
        let args = SourceArgs {
            base_url: None,
            catalog: Some("groups.yaml".into()),
        };
        assert!(matches!(
            Source::resolve(&config_with_base_url("ftp://nope"), &args),
            Ok(Source::Catalog(_))
        ));
    }

    #[test]
    fn empty_table_says_so() {
        assert_eq!(render_table(&[]), "no groups match\n");
    }

    #[test]
    fn table_has_header_and_one_row_per_group() {
        let table = render_table(&[group("GoSV", "North America", 194), group("GoSF", "", 1393)]);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[1].starts_with("GoSV"));
        assert!(lines[1].trim_end().ends_with("194"));
        assert!(lines[2].contains('\u{2014}'));
    }

    #[test]
    fn long_names_are_truncated() {
        let long = "The Extremely Long Named Golang Meetup Of Somewhere";
        let table = render_table(&[group(long, "Europe", 1)]);
        let row = table.lines().nth(1).unwrap();
        assert!(row.starts_with("The Extremely Long Named Gol..."), "{row}");
    }

    #[tokio::test]
    async fn run_map_writes_geojson_from_catalog() {
        let dir = std::env::temp_dir();
        let catalog = dir.join(format!("gogroups-cli-{}.yaml", std::process::id()));
        let out = dir.join(format!("gogroups-cli-{}.geojson", std::process::id()));
        std::fs::write(
            &catalog,
            "groups:\n  - name: Golang Paris\n    url: http://example.com/p\n    country: FR\n    lat: 48.85\n    lon: 2.35\n  - name: Null Island\n    url: http://example.com/n\n    lat: 0\n    lon: 0\n",
        )
        .unwrap();

        let source = Source::Catalog(CatalogFile::new(&catalog));
        run_map(&source, &SearchCriteria::new(), &out, 10.0)
            .await
            .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        std::fs::remove_file(&catalog).ok();
        std::fs::remove_file(&out).ok();

        assert_eq!(written["features"].as_array().map(Vec::len), Some(1));
        assert_eq!(written["features"][0]["properties"]["names"][0], "Golang Paris");
    }
}
