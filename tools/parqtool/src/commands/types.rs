use anyhow::Result;
use clap::Args;
use parqset::type_catalog;

#[derive(Args)]
pub struct TypesArgs {}

impl TypesArgs {
    pub fn run(self) -> Result<()> {
        let catalog = type_catalog();
        println!("types:");
        for (name, code) in catalog.entries() {
            println!("  {name} = {code}");
        }
        println!("units:");
        for name in catalog.unit_names() {
            let unit = catalog.resolve_unit(name)?;
            println!("  {name} = {}", unit.code());
        }
        Ok(())
    }
}
