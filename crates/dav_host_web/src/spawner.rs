//! Local task spawner for the session bus.

use futures::{
    future::LocalFutureObj,
    task::{LocalSpawn, SpawnError},
};

#[derive(Debug, Clone, Copy, Default)]
/// Spawns bus tasks onto the browser microtask queue.
///
/// Non-wasm targets have no browser event loop; spawning fails with a shutdown error there.
pub struct WasmSpawner;

impl LocalSpawn for WasmSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(future);
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            drop(future);
            Err(SpawnError::shutdown())
        }
    }
}
