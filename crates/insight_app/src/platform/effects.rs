use engine_logging::{engine_debug, engine_info};
use insight_core::{Effect, Msg};
use insight_engine::{EngineError, EngineEvent, EngineHandle, FetchSettings};

/// Executes core effects against the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        Ok(Self {
            engine: EngineHandle::new(settings)?,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchInsights { generation, query } => {
                    engine_info!(
                        "FetchInsights generation={} query_len={} query={}",
                        generation,
                        query.len(),
                        query
                    );
                    self.engine.enqueue(generation, query);
                }
            }
        }
    }

    /// Drains every event the engine has produced so far.
    pub fn poll(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(event_to_msg)
            .collect()
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::InsightsReady {
            generation,
            document,
        } => {
            engine_debug!("InsightsReady generation={} len={}", generation, document.len());
            Msg::InsightsArrived {
                generation,
                document,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::event_to_msg;
    use insight_core::Msg;
    use insight_engine::EngineEvent;

    #[test]
    fn ready_event_keeps_generation() {
        let msg = event_to_msg(EngineEvent::InsightsReady {
            generation: 3,
            document: "doc".to_string(),
        });
        assert_eq!(
            msg,
            Msg::InsightsArrived {
                generation: 3,
                document: "doc".to_string()
            }
        );
    }
}
