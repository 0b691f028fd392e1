//! Fixed text templates for the weather report.

use std::fmt::Write;

use crate::{
    error::Result,
    model::{CurrentWeather, Forecast},
};

/// Renders the current-weather block followed by the forecast block.
pub fn render_report(current: &CurrentWeather, forecast: &Forecast) -> Result<String> {
    let mut out = String::new();
    write_current(&mut out, current)?;
    write_forecast(&mut out, forecast)?;
    Ok(out)
}

pub fn write_current(out: &mut impl Write, current: &CurrentWeather) -> std::fmt::Result {
    let unit = current.units.label();
    let conditions = current
        .weather
        .iter()
        .map(|c| c.description.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    writeln!(out, "Current weather for {}:", current.name)?;
    writeln!(out, "    Conditions:  {conditions}")?;
    writeln!(out, "    Now:         {} {unit}", current.main.temp)?;
    writeln!(out, "    High:        {} {unit}", current.main.temp_max)?;
    writeln!(out, "    Low:         {} {unit}", current.main.temp_min)?;
    writeln!(out, "    Pressure:    {}", current.main.pressure)?;
    writeln!(out, "    Humidity:    {}", current.main.humidity)?;
    writeln!(out, "    FeelsLike:   {}", current.main.feels_like)?;
    writeln!(out, "    Wind Speed:  {}", current.wind.speed)?;
    writeln!(out, "    Wind Degree: {}", current.wind.deg)?;
    writeln!(out, "    Sunrise:     {} Unixtime", current.sys.sunrise)?;
    writeln!(out, "    Sunset:      {} Unixtime", current.sys.sunset)
}

pub fn write_forecast(out: &mut impl Write, forecast: &Forecast) -> std::fmt::Result {
    writeln!(out, "Weather Forecast for {}:", forecast.city.name)?;

    for entry in &forecast.list {
        let conditions = entry
            .weather
            .iter()
            .map(|c| format!("{} {}", c.main, c.description))
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(out, "Date & Time: {}", entry.dt_txt)?;
        writeln!(out, "Conditions:  {conditions}")?;
        writeln!(out, "Temp:        {}", entry.main.temp)?;
        writeln!(out, "High:        {}", entry.main.temp_max)?;
        writeln!(out, "Low:         {}", entry.main.temp_min)?;
        writeln!(out)?;
    }

    Ok(())
}
