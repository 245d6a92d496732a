//! Injury reports scraped from ESPN's league injury pages.

use crate::http::ApiClient;
use crate::traits::InjuryProvider;
use async_trait::async_trait;
use omni_common::{Lookup, OmniError, PlayerInjury, Result, Sport, TeamInjuries};
use omni_config::InjuriesConfig;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const PROVIDER: &str = "Injury report";

struct ReportSelectors {
    team_block: Selector,
    team_name: Selector,
    row: Selector,
    name: Selector,
    position: Selector,
    return_date: Selector,
    status: Selector,
    comment: Selector,
}

impl ReportSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            team_block: selector("div.ResponsiveTable.Table__league-injuries")?,
            team_name: selector("span.injuries__teamName")?,
            row: selector("tbody.Table__TBODY tr.Table__TR")?,
            name: selector("td.col-name")?,
            position: selector("td.col-pos")?,
            return_date: selector("td.col-date")?,
            status: selector("td.col-stat")?,
            comment: selector("td.col-desc")?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| OmniError::new(format!("Invalid selector '{css}': {e}")))
}

fn cell_text(row: ElementRef<'_>, selector: &Selector) -> Option<String> {
    row.select(selector)
        .next()
        .map(|cell| cell.text().collect::<String>().trim().to_string())
}

/// Extracts every team's injury table from a league injuries page.
///
/// Blocks without a team name and rows missing a cell are skipped.
pub fn parse_injury_report(html: &str) -> Result<Vec<TeamInjuries>> {
    let selectors = ReportSelectors::new()?;
    let document = Html::parse_document(html);
    let mut teams = Vec::new();

    for block in document.select(&selectors.team_block) {
        let Some(team) = cell_text(block, &selectors.team_name) else {
            debug!("Skipping injury table without a team name");
            continue;
        };

        let players = block
            .select(&selectors.row)
            .filter_map(|row| {
                Some(PlayerInjury {
                    name: cell_text(row, &selectors.name)?,
                    position: cell_text(row, &selectors.position)?,
                    return_date: cell_text(row, &selectors.return_date)?,
                    status: cell_text(row, &selectors.status)?,
                    comment: cell_text(row, &selectors.comment)?,
                })
            })
            .collect();

        teams.push(TeamInjuries { team, players });
    }

    Ok(teams)
}

/// Injury client for ESPN
pub struct EspnInjuryClient {
    http: Arc<ApiClient>,
    config: InjuriesConfig,
}

impl EspnInjuryClient {
    /// Create a client sharing `http`
    pub fn new(http: Arc<ApiClient>, config: InjuriesConfig) -> Self {
        Self { http, config }
    }

    fn report_url(&self, sport: Sport) -> String {
        format!(
            "{}/{}/injuries",
            self.config.base_url.trim_end_matches('/'),
            sport.code()
        )
    }
}

#[async_trait]
impl InjuryProvider for EspnInjuryClient {
    #[instrument(skip(self))]
    async fn fetch_injuries(&self, sport: Sport) -> Lookup<Vec<TeamInjuries>> {
        info!("Fetching {} injuries", sport.display_name());

        let url = self.report_url(sport);
        let result = self
            .http
            .request_text(PROVIDER, |client| {
                client
                    .get(&url)
                    .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            })
            .await
            .and_then(|html| parse_injury_report(&html));

        match &result {
            Ok(teams) => debug!(teams = teams.len(), "Parsed injury report"),
            Err(e) => warn!("Injury lookup failed: {}", e),
        }

        Lookup::from_items(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <div class="ResponsiveTable Table__league-injuries">
          <div class="Table__Title"><span class="injuries__teamName ml2">Dallas Cowboys</span></div>
          <table><tbody class="Table__TBODY">
            <tr class="Table__TR Table__TR--sm">
              <td class="col-name Table__TD"><a>A. Runner</a></td>
              <td class="col-pos Table__TD">RB</td>
              <td class="col-date Table__TD">Oct 26</td>
              <td class="col-stat Table__TD"><span>Questionable</span></td>
              <td class="col-desc Table__TD">Ankle soreness.</td>
            </tr>
            <tr class="Table__TR Table__TR--sm">
              <td class="col-name Table__TD">Broken Row</td>
              <td class="col-pos Table__TD">WR</td>
            </tr>
          </tbody></table>
        </div>
        <div class="ResponsiveTable Table__league-injuries">
          <span class="injuries__teamName">  New York Giants </span>
          <table><tbody class="Table__TBODY">
            <tr class="Table__TR">
              <td class="col-name">B. Blocker</td>
              <td class="col-pos">OT</td>
              <td class="col-date">Dec 1</td>
              <td class="col-stat">Injured Reserve</td>
              <td class="col-desc">Knee.</td>
            </tr>
          </tbody></table>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_injury_report() {
        let teams = parse_injury_report(PAGE).unwrap();
        assert_eq!(teams.len(), 2);

        assert_eq!(teams[0].team, "Dallas Cowboys");
        assert_eq!(teams[0].players.len(), 1);
        assert_eq!(teams[0].players[0].name, "A. Runner");
        assert_eq!(teams[0].players[0].status, "Questionable");

        assert_eq!(teams[1].team, "New York Giants");
        assert_eq!(teams[1].players[0].return_date, "Dec 1");
    }

    #[test]
    fn test_page_without_tables_is_empty() {
        let teams = parse_injury_report("<html><body><p>Maintenance</p></body></html>").unwrap();
        assert!(teams.is_empty());
    }

    #[test]
    fn test_report_url() {
        let http = Arc::new(ApiClient::new(&omni_config::HttpConfig::default()).unwrap());
        let client = EspnInjuryClient::new(http, InjuriesConfig::default());
        assert_eq!(client.report_url(Sport::Nba), "https://www.espn.com/nba/injuries");
    }
}
