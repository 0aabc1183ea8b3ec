pub mod dispatch_hook;

pub use dispatch_hook::DispatchHook;
