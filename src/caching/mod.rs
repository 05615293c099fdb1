//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 분산 캐시와 JSON 기반 객체 직렬화를 제공합니다.
//!
//! # 사용처
//!
//! - 사용자 조회 캐시 (`user:{id}`, `user:email:{email}`, TTL 10분)
//! - 리프레시 토큰 세션 (`refresh_token:{user_id}`)
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
