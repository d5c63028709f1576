//! Lua scripts for the WorkerQueue Redis implementation.

// Atomically claim an episode's throttle window and enqueue the job.
// The throttle is a plain key with a millisecond expiry: while it lives,
// submissions for the same dedup key are suppressed; once it expires the
// same key may be submitted (and will run) again. SET NX doubles as the
// check-and-set, so two racing submitters cannot both enqueue.
//
// KEYS[1]: sorted set key (queue name)
// KEYS[2]: throttle key for the job's dedup identity
// ARGV[1]: serialized job payload
// ARGV[2]: score (submit timestamp, ms)
// ARGV[3]: throttle window in ms (0 disables throttling, used for requeue)
//
// Returns:
//   1 if the job was enqueued
//   0 if an identical dedup key is inside an open throttle window
pub static SUBMIT_JOB_SCRIPT: &str = r#"
local queue_key = KEYS[1]
local throttle_key = KEYS[2]
local payload = ARGV[1]
local score = tonumber(ARGV[2])
local window_ms = tonumber(ARGV[3])

if window_ms > 0 then
    local claimed = redis.call('SET', throttle_key, ARGV[2], 'NX', 'PX', window_ms)
    if not claimed then
        return 0
    end
end

redis.call('ZADD', queue_key, score, payload)
return 1
"#;

// Pop the earliest job from the queue.
//
// KEYS[1]: sorted set key (queue name)
//
// Returns: the job payload, or nil when the queue is empty
pub static POP_JOB_SCRIPT: &str = r#"
local popped = redis.call('ZPOPMIN', KEYS[1])
if #popped == 0 then
    return false
end
return popped[1]
"#;

// Remove stale jobs from the queue: everything with a score (submit
// timestamp) older than the provided cutoff.
//
// KEYS[1]: sorted set key (queue name)
// ARGV[1]: cutoff score (timestamp, ms)
//
// Returns: number of jobs removed
pub static CLEANUP_STALE_JOBS_SCRIPT: &str = r#"
local queue_key = KEYS[1]
local cutoff_score = tonumber(ARGV[1])

local removed = redis.call('ZREMRANGEBYSCORE', queue_key, '-inf', cutoff_score)
return removed
"#;
