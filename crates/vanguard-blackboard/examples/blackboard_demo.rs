//! 黑板演示：模拟遥测/感知生产者 + 决策循环消费
//!
//! ```bash
//! cargo run --example blackboard_demo -p vanguard-blackboard
//! ```

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use vanguard_blackboard::Blackboard;
use vanguard_msgs::{
    DamageEvent, GameStatus, PerceptionFeedback, RobotStatus, TelemetryRecord,
};
use vanguard_world::{FrameTransformer, StampedPose, TransformError};

/// 演示用变换服务：传感器系到世界系只差一个固定平移
struct DemoTransformer;

impl FrameTransformer for DemoTransformer {
    fn transform_pose(
        &self,
        pose: &StampedPose,
        target_frame: &str,
    ) -> Result<StampedPose, TransformError> {
        let mut out = pose.pose;
        out.position.x += 4.0;
        out.position.y += 2.0;
        Ok(StampedPose::new(target_frame, out))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let blackboard = Arc::new(
        Blackboard::builder()
            .transformer(Arc::new(DemoTransformer))
            .build()
            .expect("build blackboard"),
    );

    // 遥测生产者：30Hz 裁判系统数据
    let telemetry = {
        let tx = blackboard.telemetry_sender();
        thread::spawn(move || {
            for i in 0..90u16 {
                let _ = tx.send(TelemetryRecord::GameStatus(
                    GameStatus::from_raw(4, 180 - i / 30).expect("valid state"),
                ));
                let _ = tx.send(TelemetryRecord::RobotStatus(RobotStatus {
                    id: 3,
                    level: 1,
                    remain_hp: 2000 - i * 10,
                    max_hp: 2000,
                    ..Default::default()
                }));
                if i % 30 == 0 {
                    let _ = tx.send(TelemetryRecord::RobotDamage(DamageEvent {
                        damage_type: 1,
                        damage_source: (i / 30 % 4) as u8,
                    }));
                }
                thread::sleep(Duration::from_millis(33));
            }
        })
    };

    // 感知生产者：缓慢移动的目标
    let perception = {
        let blackboard = blackboard.clone();
        thread::spawn(move || {
            for i in 0..30 {
                let x = 1.0 + i as f64 * 0.15;
                blackboard.on_perception_feedback(&PerceptionFeedback::detected_at(x, 0.4));
                thread::sleep(Duration::from_millis(100));
            }
            blackboard.on_perception_feedback(&PerceptionFeedback::lost());
        })
    };

    // 决策循环：1Hz 拉取当前视图
    for _ in 0..3 {
        thread::sleep(Duration::from_secs(1));
        let status = blackboard.robot_status();
        let enemy = blackboard.enemy_pose();
        println!(
            "hp={}/{} enemy_detected={} enemy=({:.2}, {:.2}) armor_attacked={:?} counters={:?}",
            status.remain_hp,
            status.max_hp,
            blackboard.is_enemy_detected(),
            enemy.position.x,
            enemy.position.y,
            blackboard.armor_attacked(),
            blackboard.damage_counters().as_array(),
        );
    }

    telemetry.join().expect("telemetry producer");
    perception.join().expect("perception producer");
    println!("final metrics: {:?}", blackboard.metrics());
}
