//! Formas de step aceptadas por la cadena.
//!
//! `Step` es un enum cerrado: cada variante transporta exactamente la forma
//! de callable que acepta, así la clasificación ocurre al construir el step
//! y no por inspección de tipos en cada invocación. La adaptación a
//! `Handler` vive en `adapt`.
//!
//! | Variante | Supervisor |
//! |---|---|
//! | `Supervise`, `Supervised`, `Recover` | sí |
//! | `Middleware` | lo decide el usuario |
//! | `Handle`, `Lazy`, `Manual`, `Handler`, `TryMap`, `Check`, `Map`, `Inspect` | no |
//! | `Invalid` | siempre se ejecuta |

pub(crate) mod adapt;

use std::fmt;
use std::sync::Arc;

use crate::chain::Chain;
use crate::errors::BoxError;
use crate::handler::{BoxedHandler, Handler};
use crate::outcome::Outcome;
use crate::tracker::Tracker;

pub type SuperviseFn<T> = Box<dyn Fn(Outcome<T>) -> Outcome<T> + Send + Sync>;
pub type MiddlewareFn<T> = Box<dyn Fn(BoxedHandler<T>) -> BoxedHandler<T> + Send + Sync>;
pub type HandleFn<T> = Box<dyn Fn(&mut Tracker<T>) + Send + Sync>;
pub type LazyFn<T> = Box<dyn Fn() -> BoxedHandler<T> + Send + Sync>;
pub type ManualFn<T> = Box<dyn Fn(&mut Tracker<T>, &dyn Handler<T>) + Send + Sync>;
pub type TryMapFn<T> = Box<dyn Fn(&T) -> Result<T, BoxError> + Send + Sync>;
pub type CheckFn<T> = Box<dyn Fn(&T) -> Result<(), BoxError> + Send + Sync>;
pub type MapFn<T> = Box<dyn Fn(T) -> T + Send + Sync>;
pub type InspectFn<T> = Box<dyn Fn(&T) + Send + Sync>;

pub enum Step<T> {
    /// `Outcome -> Outcome`; siempre se invoca y reemplaza el último valor.
    Supervise(SuperviseFn<T>),
    /// Envuelve el resto de la cadena; el usuario decide si invoca `next`.
    Middleware(MiddlewareFn<T>),
    /// Handler explícito; la cadena invoca el siguiente step al terminar.
    Handle(HandleFn<T>),
    /// Produce el handler de forma perezosa, sólo si no hay fallos.
    Lazy(LazyFn<T>),
    /// Control manual: el step es responsable de invocar `next`.
    Manual(ManualFn<T>),
    /// Handler ya construido; mismo contrato que `Handle`.
    Handler(BoxedHandler<T>),
    /// Transformación pura con fallo opcional.
    TryMap(TryMapFn<T>),
    /// Verificación sobre el payload; no lo modifica.
    Check(CheckFn<T>),
    /// Transformación pura que nunca falla.
    Map(MapFn<T>),
    /// Efecto lateral sobre el payload.
    Inspect(InspectFn<T>),
    /// Sub-cadena ejecutada bajo `catch_unwind`; el resto de la cadena
    /// externa se invoca siempre.
    Supervised(Chain<T>),
    /// Ejecuta todo lo que sigue bajo `catch_unwind`.
    Recover,
    /// Forma no reconocida: registra fallo + mensaje y continúa.
    Invalid(String),
}

impl<T: 'static> Step<T> {
    pub fn supervise<F>(f: F) -> Self
        where F: Fn(Outcome<T>) -> Outcome<T> + Send + Sync + 'static
    {
        Step::Supervise(Box::new(f))
    }

    pub fn middleware<F>(f: F) -> Self
        where F: Fn(BoxedHandler<T>) -> BoxedHandler<T> + Send + Sync + 'static
    {
        Step::Middleware(Box::new(f))
    }

    pub fn handle<F>(f: F) -> Self
        where F: Fn(&mut Tracker<T>) + Send + Sync + 'static
    {
        Step::Handle(Box::new(f))
    }

    pub fn lazy<F>(f: F) -> Self
        where F: Fn() -> BoxedHandler<T> + Send + Sync + 'static
    {
        Step::Lazy(Box::new(f))
    }

    pub fn manual<F>(f: F) -> Self
        where F: Fn(&mut Tracker<T>, &dyn Handler<T>) + Send + Sync + 'static
    {
        Step::Manual(Box::new(f))
    }

    pub fn handler<H>(h: H) -> Self
        where H: Handler<T> + 'static
    {
        Step::Handler(Arc::new(h))
    }

    pub fn try_map<F>(f: F) -> Self
        where F: Fn(&T) -> Result<T, BoxError> + Send + Sync + 'static
    {
        Step::TryMap(Box::new(f))
    }

    pub fn check<F>(f: F) -> Self
        where F: Fn(&T) -> Result<(), BoxError> + Send + Sync + 'static
    {
        Step::Check(Box::new(f))
    }

    pub fn map<F>(f: F) -> Self
        where F: Fn(T) -> T + Send + Sync + 'static
    {
        Step::Map(Box::new(f))
    }

    pub fn inspect<F>(f: F) -> Self
        where F: Fn(&T) + Send + Sync + 'static
    {
        Step::Inspect(Box::new(f))
    }

    /// Ejecuta `chain` sobre el mismo tracker; un panic dentro de ella se
    /// registra como `RailError::Panicked` y la cadena externa continúa.
    pub fn supervised(chain: Chain<T>) -> Self {
        Step::Supervised(chain)
    }

    /// Recuperación: ejecuta todo lo que sigue bajo `catch_unwind` y
    /// convierte un panic en `RailError::Panicked`, con evento `Panicked`
    /// en la traza bajo el índice de este step.
    ///
    /// Un supervisor que entra en pánico conserva mensajes y fallos previos
    /// pero pierde el payload (ya lo había consumido); lo mismo vale para
    /// un `map`.
    pub fn recover() -> Self {
        Step::Recover
    }

    pub fn invalid(shape: impl Into<String>) -> Self {
        Step::Invalid(shape.into())
    }

    /// Marca `value` como step inválido nombrando su tipo Rust.
    pub fn invalid_of<V>(_value: V) -> Self {
        Step::Invalid(std::any::type_name::<V>().to_string())
    }
}

impl<T> Step<T> {
    /// Etiqueta estable de la forma del step (logs y traza).
    pub fn shape(&self) -> &'static str {
        match self {
            Step::Supervise(_) => "supervise",
            Step::Middleware(_) => "middleware",
            Step::Handle(_) => "handle",
            Step::Lazy(_) => "lazy",
            Step::Manual(_) => "manual",
            Step::Handler(_) => "handler",
            Step::TryMap(_) => "try_map",
            Step::Check(_) => "check",
            Step::Map(_) => "map",
            Step::Inspect(_) => "inspect",
            Step::Supervised(_) => "supervised",
            Step::Recover => "recover",
            Step::Invalid(_) => "invalid",
        }
    }

    /// Steps supervisores: se ejecutan aunque haya fallos registrados.
    pub fn is_supervisory(&self) -> bool {
        matches!(self, Step::Supervise(_) | Step::Supervised(_) | Step::Recover)
    }

    /// `true` si el motor nunca salta este step por cortocircuito.
    pub fn runs_after_failure(&self) -> bool {
        matches!(self,
                 Step::Supervise(_) | Step::Supervised(_) | Step::Recover | Step::Middleware(_) | Step::Invalid(_))
    }
}

impl<T> fmt::Debug for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Invalid(shape) => f.debug_tuple("Invalid").field(shape).finish(),
            other => f.debug_tuple("Step").field(&other.shape()).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_and_flags() {
        let steps: Vec<Step<i32>> = vec![Step::supervise(|o: Outcome<i32>| o),
                                         Step::map(|v: i32| v + 1),
                                         Step::check(|_: &i32| Ok(())),
                                         Step::recover(),
                                         Step::invalid("u8")];
        let shapes: Vec<&str> = steps.iter().map(|s| s.shape()).collect();
        assert_eq!(shapes, vec!["supervise", "map", "check", "recover", "invalid"]);
        assert!(steps[0].is_supervisory());
        assert!(!steps[1].is_supervisory());
        assert!(steps[3].is_supervisory());
        assert!(steps[3].runs_after_failure());
        assert!(steps[4].runs_after_failure());
        assert!(!steps[2].runs_after_failure());
    }

    #[test]
    fn invalid_of_names_the_type() {
        let step: Step<String> = Step::invalid_of(42u64);
        match step {
            Step::Invalid(shape) => assert_eq!(shape, "u64"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
