//! Registration of the standard cells.

use crate::flow::{Gather, Quitter, Scatter, SharedPass};
use crate::io::Printer;
use crate::math::{Add, Generate, Increment, Multiply};
use plasm_core::traits::CellRegistry;

/// A registry holding every standard cell type.
pub fn standard_registry() -> CellRegistry {
    let mut registry = CellRegistry::new();
    register_standard(&mut registry);
    registry
}

/// Add the standard cell types to an existing registry.
pub fn register_standard(registry: &mut CellRegistry) {
    registry.register_fn(Generate::TYPE_NAME, |p| Ok(Box::new(Generate::from_params(p)?)));
    registry.register_fn(Increment::TYPE_NAME, |p| Ok(Box::new(Increment::from_params(p)?)));
    registry.register_fn(Add::TYPE_NAME, |_| Ok(Box::new(Add)));
    registry.register_fn(Multiply::TYPE_NAME, |p| Ok(Box::new(Multiply::from_params(p)?)));
    registry.register_fn(Printer::TYPE_NAME, |p| Ok(Box::new(Printer::from_params(p)?)));
    registry.register_fn(Scatter::TYPE_NAME, |p| Ok(Box::new(Scatter::from_params(p)?)));
    registry.register_fn(Gather::TYPE_NAME, |p| Ok(Box::new(Gather::from_params(p)?)));
    registry.register_fn(Gather::DOUBLE_TYPE_NAME, |p| {
        Ok(Box::new(Gather::double_from_params(p)?))
    });
    registry.register_fn(Quitter::TYPE_NAME, |p| Ok(Box::new(Quitter::from_params(p)?)));
    registry.register_fn(SharedPass::TYPE_NAME, |p| Ok(Box::new(SharedPass::from_params(p)?)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use plasm_core::traits::CellParams;
    use plasm_core::value::ValueType;

    #[test]
    fn registers_every_standard_cell() {
        let registry = standard_registry();
        let types: Vec<&str> = registry.cell_types().collect();
        assert_eq!(
            types,
            vec![
                "Add",
                "Gather",
                "GatherDouble",
                "Generate",
                "Increment",
                "Multiply",
                "Printer",
                "Quitter",
                "Scatter",
                "SharedPass",
            ]
        );
    }

    #[test]
    fn creates_configured_cells() {
        let registry = standard_registry();
        let params = CellParams::new(serde_yaml::from_str("n: 4").unwrap());

        let scatter = registry.create("Scatter", &params).unwrap();
        assert_eq!(scatter.info().outputs.len(), 4);

        let gather = registry.create("GatherDouble", &params).unwrap();
        let info = gather.info();
        assert_eq!(info.inputs.len(), 4);
        assert_eq!(info.inputs[0].value_type, ValueType::Double);
    }
}
