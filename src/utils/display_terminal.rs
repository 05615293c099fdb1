//! 시작 과정 터미널 출력
//!
//! [`ServiceRegistry::initialize_all`](crate::core::registry::ServiceRegistry::initialize_all)과
//! 서버 기동 배너에서 사용합니다.
//!
//! ```text
//! ╔══════════════════════════════════════════════════╗
//! ║          🔧 SERVICE REGISTRY (mongodb)           ║
//! ╚══════════════════════════════════════════════════╝
//! → Step 1: Initializing repositories
//!    ├─ order: OK (orders)
//! ✓ Step 1: Repositories initialized (6 items)
//! ```

const BOX_WIDTH: usize = 50;

pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(BOX_WIDTH);

    println!("╔{}╗", border);
    println!("║{:^49}║", title);
    println!("╚{}╝", border);
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 레지스트리 초기화가 끝난 뒤 구성 요소 수를 요약합니다.
pub fn print_final_summary(repos: usize, services: usize) {
    println!();
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    println!("   📦 Repositories: {}", repos);
    println!("   🔧 Services: {}", services);
    println!("   🚀 Total Components: {}", repos + services);
    println!();
}

/// HTTP 서버 바인딩 정보를 출력합니다.
pub fn print_server_banner(bind_address: &str, backend: &str, workers: usize) {
    print_boxed_title("🛒 COMMERCE API SERVER");
    println!("   🌐 Listening: http://{}", bind_address);
    println!("   💾 Storage: {}", backend);
    println!("   🧵 Workers: {}", workers);
    println!("   📍 Health: http://{}/health", bind_address);
    println!();
}
