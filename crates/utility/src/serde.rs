/// Whole-meter values that the backend stores as JSON integers.
pub mod whole_meters {
    use schemars::gen::SchemaGenerator;
    use schemars::schema::{InstanceType, Schema, SchemaObject};
    use serde::Serializer;

    pub fn serialize<S>(meters: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if meters.fract() == 0.0 && meters.abs() < i64::MAX as f64 {
            serializer.serialize_i64(*meters as i64)
        } else {
            serializer.serialize_f64(*meters)
        }
    }

    pub fn serialize_option<S>(
        option_meters: &Option<f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match option_meters {
            Some(meters) => serialize(meters, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn schema_option(_gen: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(vec![InstanceType::Number, InstanceType::Null].into()),
            format: Some("meters".to_owned()),
            ..Default::default()
        }
        .into()
    }
}
