use anyhow::Context;
use okada_core::model::{
    evaluate_batch, CoordinateBatch, EvaluationOptions, FaultParams, FieldColumns,
    ObservationPoint, PointEvaluation,
};
use okada_core::sensitivity::{self, Variable};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// One fault plus evaluation options, evaluated against coordinate batches
/// of the form `{ x: [...], y: [...], z?: [...] }`.
///
/// Every method returns `{ components: [[...], ...], status: [...] }` with
/// the components ordered ux, uy, uz, uxx, uyx, uzx, uxy, uyy, uzy, uxz,
/// uyz, uzz (the last nine only when `compute_strain` is set).
#[wasm_bindgen]
pub struct WasmOkada {
    fault: FaultParams<f64>,
    options: EvaluationOptions,
}

#[wasm_bindgen]
impl WasmOkada {
    #[wasm_bindgen(constructor)]
    pub fn new(params_val: JsValue, options_val: JsValue) -> Result<WasmOkada, JsValue> {
        console_error_panic_hook::set_once();

        let fault: FaultParams<f64> = from_value(params_val)
            .map_err(|e| JsValue::from_str(&format!("Invalid fault parameters: {}", e)))?;
        let options: EvaluationOptions = if options_val.is_undefined() || options_val.is_null() {
            EvaluationOptions::default()
        } else {
            from_value(options_val)
                .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))?
        };

        options
            .validate()
            .and_then(|_| fault.extent())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmOkada { fault, options })
    }

    pub fn compute(&self, coords_val: JsValue) -> Result<JsValue, JsValue> {
        let points = read_points(coords_val)?;
        let columns = evaluate_batch(&points, &self.fault, &self.options)
            .context("Evaluation failed")
            .map(|evaluations| self.columns(&evaluations));
        respond(columns)
    }

    pub fn gradient(&self, coords_val: JsValue, arg: &str) -> Result<JsValue, JsValue> {
        let points = read_points(coords_val)?;
        respond(self.gradient_columns(&points, arg))
    }

    pub fn hessian(&self, coords_val: JsValue, arg1: &str, arg2: &str) -> Result<JsValue, JsValue> {
        let points = read_points(coords_val)?;
        respond(self.hessian_columns(&points, arg1, arg2))
    }
}

impl WasmOkada {
    fn columns(&self, evaluations: &[PointEvaluation<f64>]) -> FieldColumns {
        FieldColumns::from_evaluations(evaluations, self.options.compute_strain)
    }

    fn gradient_columns(
        &self,
        points: &[ObservationPoint<f64>],
        arg: &str,
    ) -> anyhow::Result<FieldColumns> {
        let variable: Variable = arg.parse()?;
        let evaluations = sensitivity::gradient(points, &self.fault, variable, &self.options)
            .with_context(|| format!("Gradient with respect to '{}' failed", variable))?;
        Ok(self.columns(&evaluations))
    }

    fn hessian_columns(
        &self,
        points: &[ObservationPoint<f64>],
        arg1: &str,
        arg2: &str,
    ) -> anyhow::Result<FieldColumns> {
        let first: Variable = arg1.parse()?;
        let second: Variable = arg2.parse()?;
        let evaluations =
            sensitivity::hessian(points, &self.fault, first, second, &self.options)
                .with_context(|| {
                    format!("Hessian with respect to '{}' and '{}' failed", first, second)
                })?;
        Ok(self.columns(&evaluations))
    }
}

fn read_points(coords_val: JsValue) -> Result<Vec<ObservationPoint<f64>>, JsValue> {
    let batch: CoordinateBatch = from_value(coords_val)
        .map_err(|e| JsValue::from_str(&format!("Invalid coordinates: {}", e)))?;
    batch
        .points()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn respond(columns: anyhow::Result<FieldColumns>) -> Result<JsValue, JsValue> {
    let columns = columns.map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
    to_value(&columns).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::WasmOkada;
    use okada_core::model::{CoordinateBatch, EvaluationOptions, FaultParams, FieldColumns};
    use serde_wasm_bindgen::{from_value, to_value};
    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn params_value() -> JsValue {
        let fault = FaultParams::point(0.0, 0.0, 3.0, 30.0, 45.0, 90.0, 1.0).with_extent(4.0, 2.0);
        to_value(&fault).expect("fault")
    }

    fn error_message(err: JsValue) -> String {
        err.as_string().unwrap_or_default()
    }

    #[wasm_bindgen_test]
    fn compute_returns_twelve_columns_and_status() {
        let model = WasmOkada::new(params_value(), JsValue::UNDEFINED).expect("valid model");
        let coords = CoordinateBatch {
            x: vec![1.0, 5.0],
            y: vec![2.0, -1.0],
            z: Some(vec![-1.0, 0.5]),
        };
        let result = model
            .compute(to_value(&coords).expect("coords"))
            .expect("evaluation");
        let columns: FieldColumns = from_value(result).expect("columns");
        assert_eq!(columns.components.len(), 12);
        assert_eq!(columns.status, vec![0, 2]);
    }

    #[wasm_bindgen_test]
    fn unknown_argument_is_reported() {
        let model = WasmOkada::new(params_value(), JsValue::NULL).expect("valid model");
        let coords = CoordinateBatch {
            x: vec![1.0],
            y: vec![2.0],
            z: None,
        };
        let err = model
            .gradient(to_value(&coords).expect("coords"), "moment")
            .expect_err("unknown variable");
        assert!(error_message(err).contains("unknown variable 'moment'"));
    }

    #[wasm_bindgen_test]
    fn invalid_poisson_ratio_is_rejected_at_construction() {
        let options = EvaluationOptions {
            poisson_ratio: 0.9,
            ..Default::default()
        };
        let err = WasmOkada::new(params_value(), to_value(&options).expect("options"))
            .err()
            .expect("invalid ratio");
        assert!(error_message(err).contains("poisson_ratio"));
    }
}
