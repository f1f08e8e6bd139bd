//! Supported-city catalog.

use tabled::Tabled;

use transitly_core::{City, SUPPORTED_CITIES};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::output;

#[derive(Tabled)]
struct CityRow {
    #[tabled(rename = "ID")]
    id: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Realtime")]
    realtime: &'static str,
    #[tabled(rename = "Timezone")]
    timezone: &'static str,
}

impl From<&City> for CityRow {
    fn from(c: &City) -> Self {
        Self {
            id: c.id,
            name: c.name,
            region: format!("{}, {}", c.state, c.country),
            realtime: if c.has_realtime { "yes" } else { "schedule only" },
            timezone: c.timezone,
        }
    }
}

pub fn handle(global: &GlobalOpts) {
    output::print_output(&render(global.format()), global.quiet);
}

fn render(format: OutputFormat) -> String {
    output::render_list(format, SUPPORTED_CITIES, |c| CityRow::from(c), |c| c.id.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lists_every_city_id() {
        assert_eq!(
            render(OutputFormat::Plain),
            "sf\nnyc\nseattle\nportland\nboston\nchicago"
        );
    }

    #[test]
    fn table_marks_schedule_only_cities() {
        let table = render(OutputFormat::Table);
        assert!(table.contains("San Francisco"));
        assert!(table.contains("schedule only"));
    }
}
