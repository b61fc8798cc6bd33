use anyhow::Result;
use modebias::BiasDeclarations;
use schemars::gen::SchemaSettings;

fn main() -> Result<()> {
    let generator = SchemaSettings::draft2019_09().into_generator();
    let schema = generator.into_root_schema_for::<BiasDeclarations>();

    let json_output = serde_json::to_string_pretty(&schema)?;
    println!("{}", json_output);

    Ok(())
}
