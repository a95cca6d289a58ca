//! Interpretation of openSenseMap sensors as gateway properties.

use opensensemap::Sensor;
use thing::{Capability, PropertyDescription, PropertyType, PropertyValue};

use log::warn;

use crate::Profile;

/// Human readable labels for the units reported by senseBoxes.
pub const SCHEMA_UNITS: [(&str, &str); 5] = [
    ("°C", "degree celsius"),
    ("%", "percent"),
    ("µg/m³", "micrograms per cubic metre"),
    ("hPa", "hectopascal"),
    ("V", "volt"),
];

pub const PROPERTY_TYPE_BY_UNIT: [(&str, PropertyType); 4] = [
    ("°C", PropertyType::TemperatureProperty),
    ("µg/m³", PropertyType::DensityProperty),
    ("hPa", PropertyType::BarometricPressureProperty),
    ("V", PropertyType::VoltageProperty),
];

pub const DEVICE_CAPABILITIES: [(PropertyType, Capability); 2] = [
    (
        PropertyType::TemperatureProperty,
        Capability::TemperatureSensor,
    ),
    (
        PropertyType::BarometricPressureProperty,
        Capability::BarometricPressureSensor,
    ),
];

/// Returns the label for `unit`, or `unit` itself when there is none.
pub fn unit_label(unit: &str) -> &str {
    SCHEMA_UNITS
        .iter()
        .find_map(|(raw, label)| if *raw == unit { Some(*label) } else { None })
        .unwrap_or(unit)
}

pub fn property_type(unit: &str) -> Option<PropertyType> {
    PROPERTY_TYPE_BY_UNIT
        .iter()
        .find_map(|(raw, property_type)| {
            if *raw == unit {
                Some(*property_type)
            } else {
                None
            }
        })
}

pub fn capability(property_type: PropertyType) -> Option<Capability> {
    DEVICE_CAPABILITIES
        .iter()
        .find_map(|(key, capability)| {
            if *key == property_type {
                Some(*capability)
            } else {
                None
            }
        })
}

/// Builds the property descriptor for `sensor` and the device capability it
/// implies, if any.
pub fn describe_sensor(
    sensor: &Sensor,
    profile: Profile,
) -> (PropertyDescription, Option<Capability>) {
    match profile {
        Profile::Annotated => {
            let property_type = property_type(&sensor.unit);
            let capability = property_type.and_then(capability);

            let description = PropertyDescription::number(sensor.title.as_str())
                .with_type(property_type)
                .with_unit(unit_label(&sensor.unit))
                .read_only();

            (description, capability)
        }
        Profile::Plain => {
            let description = PropertyDescription::string(sensor.title.as_str())
                .with_unit(sensor.unit.as_str())
                .read_only();

            (description, None)
        }
    }
}

/// Converts a reported measurement into a property value.
///
/// In the annotated profile the leading number is used and any trailing text
/// such as a unit is ignored. Returns `None` when there is no leading number
/// or it is not finite.
pub fn parse_value(sensor_id: &str, value: &str, profile: Profile) -> Option<PropertyValue> {
    match profile {
        Profile::Annotated => match numeric_prefix(value).parse::<f64>() {
            Ok(number) if number.is_finite() => Some(PropertyValue::Number(number)),
            Ok(_) => {
                warn!("ignoring non-finite value {value:?} of sensor {sensor_id}");
                None
            }
            Err(err) => {
                warn!("unable to parse value {value:?} of sensor {sensor_id}: {err}");
                None
            }
        },
        Profile::Plain => Some(PropertyValue::String(value.to_string())),
    }
}

/// The longest decimal literal at the start of `value`, after leading
/// whitespace: sign, digits, fraction and an exponent with at least one digit.
fn numeric_prefix(value: &str) -> &str {
    let value = value.trim_start();
    let bytes = value.as_bytes();

    let digits_from = |start: usize| {
        start
            + bytes[start.min(bytes.len())..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count()
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let integer_end = digits_from(end);
    let mut mantissa_digits = integer_end - end;
    end = integer_end;

    if bytes.get(end) == Some(&b'.') {
        let fraction_end = digits_from(end + 1);
        mantissa_digits += fraction_end - end - 1;
        end = fraction_end;
    }

    if mantissa_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }

        let exponent_end = digits_from(exponent);
        if exponent_end > exponent {
            end = exponent_end;
        }
    }

    &value[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor(unit: &str) -> Sensor {
        Sensor {
            id: "s1".to_string(),
            title: "Temp".to_string(),
            unit: unit.to_string(),
            last_measurement: None,
        }
    }

    #[test]
    fn test_unit_label() {
        assert_eq!(unit_label("°C"), "degree celsius");
        assert_eq!(unit_label("%"), "percent");
        assert_eq!(unit_label("µg/m³"), "micrograms per cubic metre");
        assert_eq!(unit_label("hPa"), "hectopascal");
        assert_eq!(unit_label("V"), "volt");

        assert_eq!(unit_label("lx"), "lx");
        assert_eq!(unit_label(""), "");
    }

    #[test]
    fn test_property_type() {
        assert_eq!(property_type("°C"), Some(PropertyType::TemperatureProperty));
        assert_eq!(property_type("µg/m³"), Some(PropertyType::DensityProperty));
        assert_eq!(
            property_type("hPa"),
            Some(PropertyType::BarometricPressureProperty)
        );
        assert_eq!(property_type("V"), Some(PropertyType::VoltageProperty));

        assert_eq!(property_type("%"), None);
        assert_eq!(property_type("degree celsius"), None);
    }

    #[test]
    fn test_capability() {
        assert_eq!(
            capability(PropertyType::TemperatureProperty),
            Some(Capability::TemperatureSensor)
        );
        assert_eq!(
            capability(PropertyType::BarometricPressureProperty),
            Some(Capability::BarometricPressureSensor)
        );
        assert_eq!(capability(PropertyType::DensityProperty), None);
        assert_eq!(capability(PropertyType::VoltageProperty), None);
    }

    #[test]
    fn test_describe_annotated() {
        let (description, capability) = describe_sensor(&sensor("°C"), Profile::Annotated);

        assert_eq!(
            description,
            PropertyDescription::number("Temp")
                .with_type(Some(PropertyType::TemperatureProperty))
                .with_unit("degree celsius")
                .read_only()
        );
        assert_eq!(capability, Some(Capability::TemperatureSensor));

        let (description, capability) = describe_sensor(&sensor("%"), Profile::Annotated);

        assert_eq!(description.property_type, None);
        assert_eq!(description.unit.as_deref(), Some("percent"));
        assert_eq!(capability, None);
    }

    #[test]
    fn test_describe_plain() {
        let (description, capability) = describe_sensor(&sensor("°C"), Profile::Plain);

        assert_eq!(
            description,
            PropertyDescription::string("Temp").with_unit("°C").read_only()
        );
        assert_eq!(capability, None);
    }

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(numeric_prefix("  42"), "42");
        assert_eq!(numeric_prefix("-3.25 hPa"), "-3.25");
        assert_eq!(numeric_prefix("7.e-2kg"), "7.e-2");
        assert_eq!(numeric_prefix("3E+"), "3");
        assert_eq!(numeric_prefix("+.x"), "");
        assert_eq!(numeric_prefix("abc"), "");
        assert_eq!(numeric_prefix(""), "");
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(
            parse_value("s1", "22.0", Profile::Annotated),
            Some(PropertyValue::Number(22.0))
        );
        assert_eq!(
            parse_value("s1", " -3.25 ", Profile::Annotated),
            Some(PropertyValue::Number(-3.25))
        );
        assert_eq!(
            parse_value("s1", "21.5 °C", Profile::Annotated),
            Some(PropertyValue::Number(21.5))
        );
        assert_eq!(
            parse_value("s1", "1e3x", Profile::Annotated),
            Some(PropertyValue::Number(1000.0))
        );
        assert_eq!(
            parse_value("s1", "12e", Profile::Annotated),
            Some(PropertyValue::Number(12.0))
        );
        assert_eq!(
            parse_value("s1", ".5", Profile::Annotated),
            Some(PropertyValue::Number(0.5))
        );
        assert_eq!(parse_value("s1", "n/a", Profile::Annotated), None);
        assert_eq!(parse_value("s1", "NaN", Profile::Annotated), None);
        assert_eq!(parse_value("s1", "-", Profile::Annotated), None);
        assert_eq!(parse_value("s1", "1e999", Profile::Annotated), None);

        assert_eq!(
            parse_value("s1", "22.0", Profile::Plain),
            Some(PropertyValue::String("22.0".to_string()))
        );
    }
}
