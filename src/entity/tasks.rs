//! Shared task queue consumed by the movement layer
//!
//! Tasks are kept in insertion order. Status only ever moves forward
//! (queued -> walking -> working -> completed, skipping allowed); removal
//! deletes a record outright regardless of status.

use serde::{Deserialize, Serialize};

use crate::actions::catalog::ActivityType;
use crate::core::error::{Result, SimError};
use crate::core::types::{AgentId, TaskId, Vec3};
use crate::world::layout::RoomId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskSource {
    User,
    Ai,
    Schedule,
}

impl TaskSource {
    /// User and schedule tasks are never preempted by the planner
    pub fn is_external(&self) -> bool {
        !matches!(self, TaskSource::Ai)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Queued,
    Walking,
    Working,
    Completed,
    Removed,
}

impl TaskStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, TaskStatus::Queued | TaskStatus::Walking | TaskStatus::Working)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    fn can_advance_to(&self, next: TaskStatus) -> bool {
        self.is_active() && next > *self && next != TaskStatus::Removed
    }
}

/// A unit of work with a spatial target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub command: String,
    pub source: TaskSource,
    pub target_room: RoomId,
    pub target_position: Vec3,
    pub status: TaskStatus,
    /// Percent complete, [0, 100]
    pub progress: f32,
    pub description: String,
    pub activity: ActivityType,
    /// Sim-minutes of work once the agent arrives
    pub work_duration: f32,
    pub agent: AgentId,
    pub created_at: f64,
}

impl Task {
    pub fn new(
        id: TaskId,
        agent: AgentId,
        target_room: RoomId,
        target_position: Vec3,
        created_at: f64,
    ) -> Self {
        Self {
            id,
            command: String::new(),
            source: TaskSource::Ai,
            target_room,
            target_position,
            status: TaskStatus::Queued,
            progress: 0.0,
            description: String::new(),
            activity: ActivityType::General,
            work_duration: 0.0,
            agent,
            created_at,
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_activity(mut self, activity: ActivityType, work_duration: f32) -> Self {
        self.activity = activity;
        self.work_duration = work_duration.max(0.0);
        self
    }

    pub fn with_source(mut self, source: TaskSource) -> Self {
        self.source = source;
        self
    }
}

/// Insertion-ordered collection of every live task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskQueue {
    tasks: Vec<Task>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Append a task; it always enters as `Queued` with zero progress
    pub fn enqueue(&mut self, mut task: Task) -> TaskId {
        task.status = TaskStatus::Queued;
        task.progress = 0.0;
        let id = task.id;
        self.tasks.push(task);
        id
    }

    /// Delete a task regardless of status
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        let mut task = self.tasks.remove(idx);
        task.status = TaskStatus::Removed;
        Some(task)
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Move a task forward; backwards or out-of-terminal moves are rejected
    pub fn advance(&mut self, id: TaskId, next: TaskStatus) -> Result<()> {
        let task = self.get_mut(id).ok_or(SimError::UnknownTask(id))?;
        if task.status == next {
            return Ok(());
        }
        if !task.status.can_advance_to(next) {
            tracing::warn!(task = %id, from = ?task.status, to = ?next, "Rejected task transition");
            return Err(SimError::InvalidTransition {
                task: id,
                from: task.status,
                to: next,
            });
        }
        task.status = next;
        Ok(())
    }

    pub fn set_progress(&mut self, id: TaskId, progress: f32) -> Result<()> {
        let task = self.get_mut(id).ok_or(SimError::UnknownTask(id))?;
        task.progress = progress.clamp(0.0, 100.0);
        Ok(())
    }

    /// Mark a task completed; yields it only the first time
    pub fn complete(&mut self, id: TaskId) -> Result<Option<Task>> {
        let task = self.get_mut(id).ok_or(SimError::UnknownTask(id))?;
        match task.status {
            TaskStatus::Completed | TaskStatus::Removed => Ok(None),
            _ => {
                task.status = TaskStatus::Completed;
                task.progress = 100.0;
                Ok(Some(task.clone()))
            }
        }
    }

    /// Any non-terminal task owned by the agent
    pub fn active_task_for(&self, agent: AgentId) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|t| t.agent == agent && t.status.is_active())
    }

    /// Non-terminal user or schedule task owned by the agent
    pub fn active_external_task_for(&self, agent: AgentId) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|t| t.agent == agent && t.status.is_active() && t.source.is_external())
    }

    pub fn active_ai_task_for(&self, agent: AgentId) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|t| t.agent == agent && t.status.is_active() && t.source == TaskSource::Ai)
    }

    /// Oldest queued task for the agent, the next one the movement layer picks up
    pub fn next_queued_for(&self, agent: AgentId) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|t| t.agent == agent && t.status == TaskStatus::Queued)
    }

    /// Task currently being walked to or worked on
    pub fn in_progress_for(&self, agent: AgentId) -> Option<&Task> {
        self.tasks.iter().find(|t| {
            t.agent == agent && matches!(t.status, TaskStatus::Walking | TaskStatus::Working)
        })
    }

    /// Remove queued AI tasks of the agent; returns how many were dropped
    pub fn clear_queued_ai(&mut self, agent: AgentId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| {
            !(t.agent == agent && t.source == TaskSource::Ai && t.status == TaskStatus::Queued)
        });
        before - self.tasks.len()
    }

    /// Remove the agent's AI task that is already walking or working
    pub fn cancel_active_ai(&mut self, agent: AgentId) -> Option<Task> {
        let id = self
            .tasks
            .iter()
            .find(|t| {
                t.agent == agent
                    && t.source == TaskSource::Ai
                    && matches!(t.status, TaskStatus::Walking | TaskStatus::Working)
            })
            .map(|t| t.id)?;
        self.remove(id)
    }

    /// Remove every active task of the agent, any source
    pub fn clear_agent(&mut self, agent: AgentId) -> usize {
        let before = self.tasks.len();
        self.tasks
            .retain(|t| !(t.agent == agent && t.status.is_active()));
        before - self.tasks.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;

    fn task(agent: u32, source: TaskSource) -> Task {
        Task::new(TaskId::new(), AgentId(agent), RoomId::Kitchen, Vec2::new(4.0, -6.0).to_world(), 0.0)
            .with_activity(ActivityType::Dishes, 24.0)
            .with_source(source)
    }

    #[test]
    fn test_enqueue_forces_queued() {
        let mut queue = TaskQueue::new();
        let mut t = task(0, TaskSource::Ai);
        t.status = TaskStatus::Working;
        t.progress = 50.0;
        let id = queue.enqueue(t);
        let stored = queue.get(id).unwrap();
        assert_eq!(stored.status, TaskStatus::Queued);
        assert_eq!(stored.progress, 0.0);
    }

    #[test]
    fn test_forward_transitions_allowed() {
        let mut queue = TaskQueue::new();
        let id = queue.enqueue(task(0, TaskSource::Ai));
        queue.advance(id, TaskStatus::Walking).unwrap();
        queue.advance(id, TaskStatus::Working).unwrap();
        queue.advance(id, TaskStatus::Completed).unwrap();
        assert_eq!(queue.get(id).unwrap().status, TaskStatus::Completed);
    }

    #[test]
    fn test_skipping_forward_is_allowed() {
        let mut queue = TaskQueue::new();
        let id = queue.enqueue(task(0, TaskSource::Ai));
        queue.advance(id, TaskStatus::Working).unwrap();
        assert_eq!(queue.get(id).unwrap().status, TaskStatus::Working);
    }

    #[test]
    fn test_backward_transition_rejected() {
        let mut queue = TaskQueue::new();
        let id = queue.enqueue(task(0, TaskSource::Ai));
        queue.advance(id, TaskStatus::Working).unwrap();
        let err = queue.advance(id, TaskStatus::Walking).unwrap_err();
        assert!(matches!(err, SimError::InvalidTransition { .. }));
        assert_eq!(queue.get(id).unwrap().status, TaskStatus::Working);
    }

    #[test]
    fn test_no_transition_out_of_completed() {
        let mut queue = TaskQueue::new();
        let id = queue.enqueue(task(0, TaskSource::Ai));
        queue.complete(id).unwrap();
        assert!(queue.advance(id, TaskStatus::Working).is_err());
    }

    #[test]
    fn test_complete_is_one_shot() {
        let mut queue = TaskQueue::new();
        let id = queue.enqueue(task(0, TaskSource::Ai));
        assert!(queue.complete(id).unwrap().is_some());
        assert!(queue.complete(id).unwrap().is_none());
        assert_eq!(queue.get(id).unwrap().progress, 100.0);
    }

    #[test]
    fn test_unknown_task_errors() {
        let mut queue = TaskQueue::new();
        let missing = TaskId::new();
        assert!(matches!(queue.complete(missing), Err(SimError::UnknownTask(_))));
        assert!(matches!(queue.set_progress(missing, 5.0), Err(SimError::UnknownTask(_))));
    }

    #[test]
    fn test_progress_clamped() {
        let mut queue = TaskQueue::new();
        let id = queue.enqueue(task(0, TaskSource::Ai));
        queue.set_progress(id, 150.0).unwrap();
        assert_eq!(queue.get(id).unwrap().progress, 100.0);
        queue.set_progress(id, -1.0).unwrap();
        assert_eq!(queue.get(id).unwrap().progress, 0.0);
    }

    #[test]
    fn test_active_queries_respect_source_and_status() {
        let mut queue = TaskQueue::new();
        let ai = queue.enqueue(task(0, TaskSource::Ai));
        let user = queue.enqueue(task(0, TaskSource::User));
        assert_eq!(queue.active_task_for(AgentId(0)).unwrap().id, ai);
        assert_eq!(queue.active_external_task_for(AgentId(0)).unwrap().id, user);
        assert!(queue.active_task_for(AgentId(1)).is_none());

        queue.complete(user).unwrap();
        assert!(queue.active_external_task_for(AgentId(0)).is_none());
    }

    #[test]
    fn test_clear_queued_ai_keeps_user_and_in_progress() {
        let mut queue = TaskQueue::new();
        let walking = queue.enqueue(task(0, TaskSource::Ai));
        queue.advance(walking, TaskStatus::Walking).unwrap();
        queue.enqueue(task(0, TaskSource::Ai));
        queue.enqueue(task(0, TaskSource::Ai));
        let user = queue.enqueue(task(0, TaskSource::User));
        let other = queue.enqueue(task(1, TaskSource::Ai));

        assert_eq!(queue.clear_queued_ai(AgentId(0)), 2);
        assert!(queue.get(walking).is_some());
        assert!(queue.get(user).is_some());
        assert!(queue.get(other).is_some());

        let cancelled = queue.cancel_active_ai(AgentId(0)).unwrap();
        assert_eq!(cancelled.id, walking);
        assert_eq!(cancelled.status, TaskStatus::Removed);
        assert!(queue.cancel_active_ai(AgentId(0)).is_none());
    }

    #[test]
    fn test_remove_any_status() {
        let mut queue = TaskQueue::new();
        let id = queue.enqueue(task(0, TaskSource::User));
        queue.advance(id, TaskStatus::Working).unwrap();
        assert!(queue.remove(id).is_some());
        assert!(queue.get(id).is_none());
        assert!(queue.remove(id).is_none());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut queue = TaskQueue::new();
        let a = queue.enqueue(task(0, TaskSource::Ai));
        let b = queue.enqueue(task(0, TaskSource::Ai));
        let ids: Vec<_> = queue.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(queue.next_queued_for(AgentId(0)).unwrap().id, a);
    }
}
